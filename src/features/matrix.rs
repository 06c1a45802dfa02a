use crate::error::AppError;

/// Dense row-major feature matrix with named columns.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    names: Vec<String>,
    values: Vec<f32>,
    n_rows: usize,
}

impl FeatureMatrix {
    pub fn new(names: Vec<String>, values: Vec<f32>) -> Result<Self, AppError> {
        let n_cols = names.len();
        if n_cols == 0 {
            if !values.is_empty() {
                return Err(AppError::Data("values given for a matrix without columns".into()));
            }
            return Ok(FeatureMatrix { names, values, n_rows: 0 });
        }
        if values.len() % n_cols != 0 {
            return Err(AppError::Data(format!(
                "{} values do not fill rows of {} columns",
                values.len(),
                n_cols
            )));
        }
        let n_rows = values.len() / n_cols;
        Ok(FeatureMatrix { names, values, n_rows })
    }

    pub fn from_rows(names: Vec<String>, rows: &[Vec<f32>]) -> Result<Self, AppError> {
        if let Some(bad) = rows.iter().position(|r| r.len() != names.len()) {
            return Err(AppError::Data(format!(
                "row {} has {} values, expected {}",
                bad,
                rows[bad].len(),
                names.len()
            )));
        }
        Self::new(names, rows.concat())
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.names.len()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn row(&self, row: usize) -> &[f32] {
        let n_cols = self.n_cols();
        &self.values[row * n_cols..(row + 1) * n_cols]
    }

    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.values[row * self.n_cols() + col]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f32]> {
        (0..self.n_rows).map(move |r| self.row(r))
    }

    /// New matrix holding the given rows, in the given order.
    pub fn select_rows(&self, indices: &[usize]) -> FeatureMatrix {
        let mut values = Vec::with_capacity(indices.len() * self.n_cols());
        for &i in indices {
            values.extend_from_slice(self.row(i));
        }
        FeatureMatrix {
            names: self.names.clone(),
            values,
            n_rows: indices.len(),
        }
    }

    /// Position of the first NaN or infinite cell, if any.
    pub fn first_non_finite(&self) -> Option<(usize, usize)> {
        let n_cols = self.n_cols();
        self.values
            .iter()
            .position(|v| !v.is_finite())
            .map(|i| (i / n_cols, i % n_cols))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("f{}", i)).collect()
    }

    #[test]
    fn rejects_ragged_values() {
        assert!(FeatureMatrix::new(names(3), vec![0.0; 7]).is_err());
        assert!(FeatureMatrix::from_rows(names(2), &[vec![1.0, 2.0], vec![3.0]]).is_err());
    }

    #[test]
    fn select_rows_keeps_order() {
        let m = FeatureMatrix::from_rows(names(2), &[vec![0.0, 1.0], vec![2.0, 3.0], vec![4.0, 5.0]])
            .unwrap();
        let picked = m.select_rows(&[2, 0]);
        assert_eq!(picked.n_rows(), 2);
        assert_eq!(picked.row(0), &[4.0, 5.0]);
        assert_eq!(picked.row(1), &[0.0, 1.0]);
    }

    #[test]
    fn finds_non_finite_cells() {
        let m = FeatureMatrix::from_rows(names(2), &[vec![0.0, 1.0], vec![f32::NAN, 3.0]]).unwrap();
        assert_eq!(m.first_non_finite(), Some((1, 0)));
    }
}

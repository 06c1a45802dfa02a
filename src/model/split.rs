use crate::error::AppError;
use crate::features::encoder::EncodedDataset;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Disjoint holdout partition of an encoded dataset.
#[derive(Debug, Clone)]
pub struct TrainTestSplit {
    pub train: EncodedDataset,
    pub test: EncodedDataset,
    pub train_indices: Vec<usize>,
    pub test_indices: Vec<usize>,
}

/// Shuffles rows with a seeded RNG and holds out `ceil(n * test_size)` of them.
pub fn train_test_split(
    dataset: &EncodedDataset,
    test_size: f64,
    seed: u64,
) -> Result<TrainTestSplit, AppError> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(AppError::Config(format!(
            "test size must be strictly between 0 and 1, got {}",
            test_size
        )));
    }

    let n = dataset.len();
    let n_test = (n as f64 * test_size).ceil() as usize;
    if n_test == 0 || n_test >= n {
        return Err(AppError::Data(format!(
            "cannot split {} rows with test size {}",
            n, test_size
        )));
    }

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let train_indices = indices.split_off(n_test);
    let test_indices = indices;

    log::info!(
        "Split {} rows into {} train / {} test (seed {})",
        n,
        train_indices.len(),
        test_indices.len(),
        seed
    );

    Ok(TrainTestSplit {
        train: dataset.select_rows(&train_indices),
        test: dataset.select_rows(&test_indices),
        train_indices,
        test_indices,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::matrix::FeatureMatrix;
    use std::collections::HashSet;

    fn dataset(n: usize) -> EncodedDataset {
        let rows: Vec<Vec<f32>> = (0..n).map(|i| vec![i as f32]).collect();
        let features = FeatureMatrix::from_rows(vec!["row".to_string()], &rows).unwrap();
        let labels = (0..n).map(|i| if i % 2 == 0 { 1 } else { 2 }).collect();
        EncodedDataset::new(features, labels).unwrap()
    }

    #[test]
    fn partitions_every_row_exactly_once() {
        let split = train_test_split(&dataset(101), 0.2, 42).unwrap();
        assert_eq!(split.train.len() + split.test.len(), 101);
        assert_eq!(split.test.len(), 21);

        let train: HashSet<_> = split.train_indices.iter().copied().collect();
        let test: HashSet<_> = split.test_indices.iter().copied().collect();
        assert!(train.is_disjoint(&test));
        assert_eq!(train.union(&test).count(), 101);
    }

    #[test]
    fn rows_stay_aligned_with_labels() {
        let split = train_test_split(&dataset(50), 0.2, 3).unwrap();
        for part in [&split.train, &split.test] {
            for (row, &label) in part.features.rows().zip(&part.labels) {
                let original = row[0] as usize;
                assert_eq!(label, if original % 2 == 0 { 1 } else { 2 });
            }
        }
    }

    #[test]
    fn same_seed_same_partition() {
        let data = dataset(64);
        let a = train_test_split(&data, 0.2, 42).unwrap();
        let b = train_test_split(&data, 0.2, 42).unwrap();
        let c = train_test_split(&data, 0.2, 43).unwrap();
        assert_eq!(a.test_indices, b.test_indices);
        assert_eq!(a.train_indices, b.train_indices);
        assert_ne!(a.test_indices, c.test_indices);
    }

    #[test]
    fn rejects_degenerate_inputs() {
        assert!(matches!(
            train_test_split(&dataset(10), 0.0, 1),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            train_test_split(&dataset(1), 0.2, 1),
            Err(AppError::Data(_))
        ));
    }
}

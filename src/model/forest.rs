use super::tree::{DecisionTree, TreeParams};
use super::Classifier;
use crate::config::{DEFAULT_SEED, DEFAULT_TREES};
use crate::data::models::Winner;
use crate::error::AppError;
use crate::features::matrix::FeatureMatrix;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ForestParams {
    pub n_trees: usize,
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    /// Candidate features per split; `None` means sqrt of the column count.
    pub max_features: Option<usize>,
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        ForestParams {
            n_trees: DEFAULT_TREES,
            max_depth: None,
            min_samples_split: 2,
            max_features: None,
            seed: DEFAULT_SEED,
        }
    }
}

/// Bagged ensemble of CART trees voting on the winner.
#[derive(Debug, Clone)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    feature_names: Vec<String>,
}

impl RandomForest {
    pub fn fit(x: &FeatureMatrix, labels: &[u8], params: &ForestParams) -> Result<Self, AppError> {
        Self::fit_with_progress(x, labels, params, || {})
    }

    /// Like [`RandomForest::fit`], calling `on_tree` after each tree is grown.
    /// Trees are grown in parallel; the result only depends on the seed.
    pub fn fit_with_progress<F>(
        x: &FeatureMatrix,
        labels: &[u8],
        params: &ForestParams,
        on_tree: F,
    ) -> Result<Self, AppError>
    where
        F: Fn() + Sync,
    {
        if x.n_rows() == 0 {
            return Err(AppError::Data("training set is empty".to_string()));
        }
        if x.n_rows() != labels.len() {
            return Err(AppError::Data(format!(
                "{} training rows but {} labels",
                x.n_rows(),
                labels.len()
            )));
        }
        if params.n_trees == 0 {
            return Err(AppError::Config("forest needs at least one tree".to_string()));
        }
        if let Some((row, col)) = x.first_non_finite() {
            return Err(AppError::Data(format!(
                "non-numeric value in training row {} column '{}'",
                row,
                x.names()[col]
            )));
        }
        let classes = labels
            .iter()
            .map(|&l| Winner::try_from(l).map(Winner::index))
            .collect::<Result<Vec<usize>, AppError>>()?;

        let n_rows = x.n_rows();
        let tree_params = TreeParams {
            max_depth: params.max_depth,
            min_samples_split: params.min_samples_split,
            max_features: params
                .max_features
                .unwrap_or_else(|| (x.n_cols() as f64).sqrt().floor().max(1.0) as usize),
        };

        let mut master = StdRng::seed_from_u64(params.seed);
        let seeds: Vec<u64> = (0..params.n_trees).map(|_| master.gen()).collect();

        log::info!(
            "Fitting {} trees on {} rows x {} features (max_features={})",
            params.n_trees,
            n_rows,
            x.n_cols(),
            tree_params.max_features
        );

        let trees: Vec<DecisionTree> = seeds
            .par_iter()
            .map(|&seed| {
                let mut rng = StdRng::seed_from_u64(seed);
                let bootstrap: Vec<usize> = (0..n_rows).map(|_| rng.gen_range(0..n_rows)).collect();
                let tree = DecisionTree::fit(x, &classes, bootstrap, &tree_params, &mut rng);
                on_tree();
                tree
            })
            .collect();

        log::debug!(
            "Forest fitted: {} nodes, mean depth {:.1}",
            trees.iter().map(DecisionTree::n_nodes).sum::<usize>(),
            trees.iter().map(DecisionTree::depth).sum::<usize>() as f64 / trees.len() as f64
        );

        Ok(RandomForest {
            trees,
            feature_names: x.names().to_vec(),
        })
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Tree votes for (team 1, team 2).
    pub fn votes(&self, row: &[f32]) -> [usize; 2] {
        let mut votes = [0; 2];
        for tree in &self.trees {
            votes[tree.predict_class(row)] += 1;
        }
        votes
    }

    /// Fraction of trees voting for each team.
    pub fn predict_proba_row(&self, row: &[f32]) -> [f64; 2] {
        let votes = self.votes(row);
        let total = self.trees.len() as f64;
        [votes[0] as f64 / total, votes[1] as f64 / total]
    }

    /// Majority vote; an exact tie goes to team 1.
    pub fn predict_row(&self, row: &[f32]) -> Winner {
        let votes = self.votes(row);
        if votes[1] > votes[0] {
            Winner::Team2
        } else {
            Winner::Team1
        }
    }

    fn check_columns(&self, x: &FeatureMatrix) -> Result<(), AppError> {
        if x.n_cols() != self.feature_names.len() {
            return Err(AppError::Data(format!(
                "model expects {} features, got {}",
                self.feature_names.len(),
                x.n_cols()
            )));
        }
        Ok(())
    }
}

impl Classifier for RandomForest {
    fn predict(&self, x: &FeatureMatrix) -> Result<Vec<Winner>, AppError> {
        self.check_columns(x)?;
        Ok(x.rows().map(|row| self.predict_row(row)).collect())
    }

    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Per-tree normalised impurity decrease averaged over trees that split,
    /// renormalised to sum to 1. Uniform when no tree split at all.
    fn feature_importances(&self) -> Vec<f64> {
        let n_features = self.feature_names.len();
        let mut totals = vec![0.0f64; n_features];

        for tree in &self.trees {
            let raw = tree.raw_importances();
            let sum: f64 = raw.iter().sum();
            if sum <= 0.0 {
                continue;
            }
            for (total, &value) in totals.iter_mut().zip(raw) {
                *total += value / sum;
            }
        }

        let sum: f64 = totals.iter().sum();
        if sum > 0.0 {
            totals.iter_mut().for_each(|v| *v /= sum);
        } else if n_features > 0 {
            totals.iter_mut().for_each(|v| *v = 1.0 / n_features as f64);
        }
        totals
    }

    fn name(&self) -> &str {
        "random forest"
    }
}

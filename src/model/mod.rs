pub mod forest;
pub mod split;
pub mod tree;

use crate::data::models::Winner;
use crate::error::AppError;
use crate::features::matrix::FeatureMatrix;

/// Contract between a fitted model and the evaluator.
pub trait Classifier {
    /// Predicted winner for every row of `x`.
    fn predict(&self, x: &FeatureMatrix) -> Result<Vec<Winner>, AppError>;

    /// Column names the model was fitted on, in order.
    fn feature_names(&self) -> &[String];

    /// Non-negative weight per feature, summing to 1.
    fn feature_importances(&self) -> Vec<f64>;

    fn name(&self) -> &str {
        "classifier"
    }
}

use crate::data::models::Winner;
use crate::error::AppError;
use crate::features::encoder::EncodedDataset;
use crate::model::Classifier;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedFeature {
    pub rank: usize,
    pub name: String,
    pub importance: f64,
}

/// Rows are the true winner, columns the predicted one (team 1, team 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ConfusionMatrix {
    pub counts: [[usize; 2]; 2],
}

impl ConfusionMatrix {
    pub fn record(&mut self, actual: Winner, predicted: Winner) {
        self.counts[actual.index()][predicted.index()] += 1;
    }

    pub fn correct(&self) -> usize {
        self.counts[0][0] + self.counts[1][1]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub accuracy: f64,
    pub correct: usize,
    pub total: usize,
    pub confusion: ConfusionMatrix,
    pub top_features: Vec<RankedFeature>,
}

pub fn evaluate<C: Classifier>(
    model: &C,
    test: &EncodedDataset,
    top_k: usize,
) -> Result<Evaluation, AppError> {
    if test.is_empty() {
        return Err(AppError::Data("test set is empty".to_string()));
    }

    let predictions = model.predict(&test.features)?;
    let mut confusion = ConfusionMatrix::default();
    for (&label, &predicted) in test.labels.iter().zip(&predictions) {
        confusion.record(Winner::try_from(label)?, predicted);
    }

    let correct = confusion.correct();
    let total = confusion.total();
    let accuracy = correct as f64 / total as f64;
    log::info!("{} holdout accuracy: {}/{} = {:.4}", model.name(), correct, total, accuracy);

    Ok(Evaluation {
        accuracy,
        correct,
        total,
        confusion,
        top_features: rank_features(model.feature_names(), &model.feature_importances(), top_k),
    })
}

/// Sorts features by importance, descending; equal weights keep column order.
pub fn rank_features(names: &[String], importances: &[f64], top_k: usize) -> Vec<RankedFeature> {
    let mut order: Vec<usize> = (0..names.len().min(importances.len())).collect();
    order.sort_by(|&a, &b| importances[b].total_cmp(&importances[a]));
    order
        .into_iter()
        .take(top_k)
        .enumerate()
        .map(|(i, col)| RankedFeature {
            rank: i + 1,
            name: names[col].clone(),
            importance: importances[col],
        })
        .collect()
}

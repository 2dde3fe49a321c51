//! Aggregate statistics per scoring model.

use serde::{Deserialize, Serialize};

use crate::model::{RankedRecord, ScoreModel};

/// Statistics for a single model across the whole batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelStats {
    pub model: ScoreModel,
    /// Number of admitted applicants.
    pub admitted: usize,
    /// Admitted / total.
    pub admit_rate: f64,
    pub mean_score: f64,
    pub min_score: f64,
    pub max_score: f64,
}

/// Compute [`ModelStats`] for one model. An empty batch yields all zeros.
pub fn model_stats(records: &[RankedRecord], model: ScoreModel) -> ModelStats {
    let (scores, admitted): (Vec<f64>, usize) = match model {
        ScoreModel::Blind => (
            records.iter().map(|r| r.blind_score).collect(),
            records
                .iter()
                .filter(|r| r.blind_decision.is_admitted())
                .count(),
        ),
        ScoreModel::Aware => (
            records.iter().map(|r| r.aware_score).collect(),
            records
                .iter()
                .filter(|r| r.aware_decision.is_admitted())
                .count(),
        ),
    };

    if scores.is_empty() {
        return ModelStats {
            model,
            admitted: 0,
            admit_rate: 0.0,
            mean_score: 0.0,
            min_score: 0.0,
            max_score: 0.0,
        };
    }

    let n = scores.len() as f64;
    ModelStats {
        model,
        admitted,
        admit_rate: admitted as f64 / n,
        mean_score: scores.iter().sum::<f64>() / n,
        min_score: scores.iter().copied().fold(f64::INFINITY, f64::min),
        max_score: scores.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    }
}

/// Stats for both models, blind first.
pub fn compute_model_stats(records: &[RankedRecord]) -> Vec<ModelStats> {
    ScoreModel::ALL
        .iter()
        .map(|&model| model_stats(records, model))
        .collect()
}

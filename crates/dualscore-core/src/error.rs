//! Engine error types.
//!
//! These errors mean the blind/aware comparison is not meaningful for the
//! given batch. Malformed numeric features and empty fairness partitions are
//! recovered inside the engine and never show up here.

use thiserror::Error;

use crate::model::{ApplicantId, ScoreModel};

/// Errors that abort an evaluation run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoringError {
    /// The batch contained no applicants, so there is nothing to rank.
    #[error("no applicants to evaluate")]
    EmptyInput,

    /// Two applicants share a display name.
    #[error("duplicate applicant name '{name}' (rows {} and {})", first.0 + 1, second.0 + 1)]
    DuplicateName {
        name: String,
        first: ApplicantId,
        second: ApplicantId,
    },

    /// The score configuration cannot produce bounded scores.
    #[error("invalid score configuration: {0}")]
    InvalidConfig(String),

    /// A scored applicant is absent from one of the rank tables.
    #[error("applicant at row {} has no {model} rank", id.0 + 1)]
    MissingRank { id: ApplicantId, model: ScoreModel },
}

impl ScoringError {
    /// Returns `true` if the error comes from the input batch rather than the configuration.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ScoringError::EmptyInput | ScoringError::DuplicateName { .. }
        )
    }
}

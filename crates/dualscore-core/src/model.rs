//! Core data model types for dualscore.
//!
//! These are the applicant records consumed by the engine and the derived
//! rows it produces while scoring, ranking, and comparing.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::compare::Shift;
use crate::decision::Decision;
use crate::scoring::BonusContribution;

/// Position of an applicant in the input batch.
///
/// Used as the join key between score rows and rank tables so that the
/// display name never has to double as an identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicantId(pub usize);

/// A single applicant record as delivered by the ingestion layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Applicant {
    /// Display name; unique within one run.
    pub name: String,
    pub age: u32,
    pub geography: String,
    /// Carried through to reports, never used for scoring.
    pub ethnicity: String,
    /// Household income with currency formatting stripped.
    pub income: f64,
    pub legacy: bool,
    pub local: bool,
    /// Grade point average on a `[0, max_gpa]` scale.
    pub gpa: f64,
    /// Standardized test score on a `[0, max_test]` scale.
    pub test: f64,
    /// Extra-curricular score, pre-normalized to `[0, 1]`.
    pub extra: f64,
    /// Essay score, pre-normalized to `[0, 1]`.
    pub essay: f64,
    /// Recommendation score, pre-normalized to `[0, 1]`.
    pub rec: f64,
    pub first_gen: bool,
    pub disability: bool,
}

/// Which of the two competing scoring models a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreModel {
    /// Merit features only.
    Blind,
    /// Blind score plus equity bonuses.
    Aware,
}

impl ScoreModel {
    pub const ALL: [ScoreModel; 2] = [ScoreModel::Blind, ScoreModel::Aware];
}

impl fmt::Display for ScoreModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreModel::Blind => write!(f, "blind"),
            ScoreModel::Aware => write!(f, "aware"),
        }
    }
}

/// An applicant with both model scores and decisions attached.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRecord<'a> {
    pub id: ApplicantId,
    pub applicant: &'a Applicant,
    pub blind_score: f64,
    pub aware_score: f64,
    pub blind_decision: Decision,
    pub aware_decision: Decision,
    /// Equity bonuses that applied under the aware model.
    pub bonuses: Vec<BonusContribution>,
}

impl ScoredRecord<'_> {
    /// Score under the selected model.
    pub fn score(&self, model: ScoreModel) -> f64 {
        match model {
            ScoreModel::Blind => self.blind_score,
            ScoreModel::Aware => self.aware_score,
        }
    }

    /// Decision under the selected model.
    pub fn decision(&self, model: ScoreModel) -> Decision {
        match model {
            ScoreModel::Blind => self.blind_decision,
            ScoreModel::Aware => self.aware_decision,
        }
    }
}

/// One fully evaluated row, as handed to reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedRecord {
    pub id: ApplicantId,
    pub name: String,
    pub blind_score: f64,
    pub aware_score: f64,
    pub blind_decision: Decision,
    pub aware_decision: Decision,
    /// 1-based rank under the blind model.
    pub blind_rank: u32,
    /// 1-based rank under the aware model.
    pub aware_rank: u32,
    /// `blind_rank - aware_rank`; positive when the aware model ranks the applicant higher.
    pub rank_delta: i64,
    pub shift: Shift,
    #[serde(default)]
    pub bonuses: Vec<BonusContribution>,
}

impl RankedRecord {
    /// Applied bonuses as `Label +0.05, ...`, or `-` when none applied.
    pub fn bonus_summary(&self) -> String {
        if self.bonuses.is_empty() {
            return "-".to_string();
        }
        self.bonuses
            .iter()
            .map(|b| format!("{} {:+.2}", b.label, b.amount))
            .collect::<Vec<_>>()
            .join(", ")
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_model_display() {
        assert_eq!(ScoreModel::Blind.to_string(), "blind");
        assert_eq!(ScoreModel::Aware.to_string(), "aware");
    }

    #[test]
    fn applicant_id_serializes_as_number() {
        let json = serde_json::to_string(&ApplicantId(7)).unwrap();
        assert_eq!(json, "7");
    }

    #[test]
    fn applicant_serde_roundtrip() {
        let app = fixtures::applicant("Grace");
        let json = serde_json::to_string(&app).unwrap();
        let back: Applicant = serde_json::from_str(&json).unwrap();
        assert_eq!(back, app);
    }

    #[test]
    fn bonus_summary_lists_labels_and_amounts() {
        let mut row = RankedRecord {
            id: ApplicantId(0),
            name: "Ada".into(),
            blind_score: 0.775,
            aware_score: 0.825,
            blind_decision: Decision::Rejected,
            aware_decision: Decision::Admitted,
            blind_rank: 2,
            aware_rank: 2,
            rank_delta: 0,
            shift: Shift::Upshift,
            bonuses: Vec::new(),
        };
        assert_eq!(row.bonus_summary(), "-");

        row.bonuses = vec![
            BonusContribution {
                label: "Low income".into(),
                amount: 0.05,
            },
            BonusContribution {
                label: "Legacy".into(),
                amount: -0.02,
            },
        ];
        assert_eq!(row.bonus_summary(), "Low income +0.05, Legacy -0.02");
    }
}

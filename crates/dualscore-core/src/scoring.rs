//! Blind and aware scoring models.
//!
//! Both models are pure functions of an [`Applicant`] and a [`ScoreConfig`]
//! and always return a value in `[0, 1]`.

use serde::{Deserialize, Serialize};

use crate::config::ScoreConfig;
use crate::model::Applicant;

/// Clamp a value into `[0, 1]`. NaN maps to 0.
pub fn clamp01(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}

/// Treat a non-finite feature as 0 so it can't poison a weighted sum.
pub fn sanitize(x: f64) -> f64 {
    if x.is_finite() {
        x
    } else {
        0.0
    }
}

/// Merit features scaled to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedFeatures {
    pub gpa: f64,
    pub test: f64,
    pub extra: f64,
    pub essay: f64,
    pub rec: f64,
}

impl NormalizedFeatures {
    pub fn from_applicant(app: &Applicant, config: &ScoreConfig) -> Self {
        Self {
            gpa: clamp01(sanitize(app.gpa) / config.max_gpa),
            test: clamp01(sanitize(app.test) / config.max_test),
            extra: clamp01(sanitize(app.extra)),
            essay: clamp01(sanitize(app.essay)),
            rec: clamp01(sanitize(app.rec)),
        }
    }
}

/// Merit-only score.
pub fn blind_score(app: &Applicant, config: &ScoreConfig) -> f64 {
    let n = NormalizedFeatures::from_applicant(app, config);
    let w = &config.weights;

    let mut score = 0.0;
    score += n.gpa * w.gpa;
    score += n.test * w.test;
    score += n.extra * w.extra;
    score += n.essay * w.essay;
    score += n.rec * w.rec;

    clamp01(score)
}

/// Blind score plus every applicable equity bonus, clamped.
pub fn aware_score(app: &Applicant, config: &ScoreConfig) -> f64 {
    let blind = blind_score(app, config);
    let bonus: f64 = applicable_bonuses(app, config)
        .iter()
        .map(|b| b.amount)
        .sum();
    clamp01(blind + bonus)
}

/// A single equity bonus that applied to an applicant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusContribution {
    pub label: String,
    pub amount: f64,
}

/// How an aware score was assembled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub blind: f64,
    pub bonuses: Vec<BonusContribution>,
    /// Final clamped score; equals [`aware_score`].
    pub aware: f64,
}

impl ScoreBreakdown {
    /// Sum of the bonuses before clamping.
    pub fn raw_total(&self) -> f64 {
        self.blind + self.bonuses.iter().map(|b| b.amount).sum::<f64>()
    }

    /// Returns `true` if clamping cut off part of the bonus total.
    pub fn saturated(&self) -> bool {
        self.raw_total() > self.aware
    }
}

/// Explain an applicant's aware score.
pub fn aware_breakdown(app: &Applicant, config: &ScoreConfig) -> ScoreBreakdown {
    let blind = blind_score(app, config);
    let bonuses = applicable_bonuses(app, config);
    let total: f64 = bonuses.iter().map(|b| b.amount).sum();
    ScoreBreakdown {
        blind,
        aware: clamp01(blind + total),
        bonuses,
    }
}

fn applicable_bonuses(app: &Applicant, config: &ScoreConfig) -> Vec<BonusContribution> {
    let b = &config.bonuses;
    // NaN income never compares below the threshold.
    let flags = [
        ("Low income", app.income < config.low_income_threshold, b.low_income),
        ("First-gen", app.first_gen, b.first_gen),
        ("Disability", app.disability, b.disability),
        ("Legacy", app.legacy, b.legacy),
        ("Local", app.local, b.local),
    ];

    flags
        .into_iter()
        .filter(|(_, applies, _)| *applies)
        .map(|(label, _, amount)| BonusContribution {
            label: label.to_string(),
            amount,
        })
        .collect()
}

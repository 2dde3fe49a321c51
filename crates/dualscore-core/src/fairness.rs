//! Group admit-rate disparity between the two models.
//!
//! Each predicate splits the whole batch into an in-group and an out-group;
//! every record lands on exactly one side. An empty side reports a rate of
//! 0.0 rather than NaN.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::ScoreConfig;
use crate::decision::decide;
use crate::model::{Applicant, ScoreModel, ScoredRecord};

/// The fixed set of groups reported for every run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupPredicate {
    LowIncome,
    FirstGen,
    Disability,
    Legacy,
    Local,
}

impl GroupPredicate {
    pub const ALL: [GroupPredicate; 5] = [
        GroupPredicate::LowIncome,
        GroupPredicate::FirstGen,
        GroupPredicate::Disability,
        GroupPredicate::Legacy,
        GroupPredicate::Local,
    ];

    pub fn label(self) -> &'static str {
        match self {
            GroupPredicate::LowIncome => "Low income",
            GroupPredicate::FirstGen => "First-gen",
            GroupPredicate::Disability => "Disability",
            GroupPredicate::Legacy => "Legacy",
            GroupPredicate::Local => "Local",
        }
    }

    /// Whether an applicant belongs to the in-group.
    pub fn matches(self, app: &Applicant, config: &ScoreConfig) -> bool {
        match self {
            GroupPredicate::LowIncome => app.income < config.low_income_threshold,
            GroupPredicate::FirstGen => app.first_gen,
            GroupPredicate::Disability => app.disability,
            GroupPredicate::Legacy => app.legacy,
            GroupPredicate::Local => app.local,
        }
    }
}

impl fmt::Display for GroupPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// In-group vs. out-group admit rates for one predicate under one model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub label: String,
    pub model: ScoreModel,
    pub in_group_size: usize,
    pub out_group_size: usize,
    pub in_group_rate: f64,
    pub out_group_rate: f64,
}

impl GroupSummary {
    /// `in_group_rate - out_group_rate`.
    pub fn gap(&self) -> f64 {
        self.in_group_rate - self.out_group_rate
    }
}

/// Both models' summaries for one predicate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FairnessTable {
    pub group: GroupPredicate,
    pub blind: GroupSummary,
    pub aware: GroupSummary,
}

/// Fraction of `side` admitted under `model`; 0.0 for an empty side.
pub fn admit_rate(side: &[&ScoredRecord<'_>], cutoff: f64, model: ScoreModel) -> f64 {
    if side.is_empty() {
        return 0.0;
    }
    let admitted = side
        .iter()
        .filter(|r| decide(r.score(model), cutoff).is_admitted())
        .count();
    admitted as f64 / side.len() as f64
}

/// Partition the batch with `predicate` and report both sides' admit rates.
pub fn summarize<P>(
    records: &[ScoredRecord<'_>],
    label: &str,
    predicate: P,
    cutoff: f64,
    model: ScoreModel,
) -> GroupSummary
where
    P: Fn(&Applicant) -> bool,
{
    let (in_group, out_group): (Vec<&ScoredRecord<'_>>, Vec<&ScoredRecord<'_>>) =
        records.iter().partition(|r| predicate(r.applicant));

    GroupSummary {
        label: label.to_string(),
        model,
        in_group_size: in_group.len(),
        out_group_size: out_group.len(),
        in_group_rate: admit_rate(&in_group, cutoff, model),
        out_group_rate: admit_rate(&out_group, cutoff, model),
    }
}

/// One table per built-in predicate, in [`GroupPredicate::ALL`] order.
pub fn fairness_tables(records: &[ScoredRecord<'_>], config: &ScoreConfig) -> Vec<FairnessTable> {
    GroupPredicate::ALL
        .iter()
        .map(|&group| {
            let pred = |app: &Applicant| group.matches(app, config);
            FairnessTable {
                group,
                blind: summarize(records, group.label(), pred, config.cutoff, ScoreModel::Blind),
                aware: summarize(records, group.label(), pred, config.cutoff, ScoreModel::Aware),
            }
        })
        .collect()
}

//! Dense positional ranking under one scoring model.
//!
//! Records are ordered by score descending, then by applicant name ascending,
//! then by input position. The order is total, so ranks are reproducible
//! across runs and identical inputs always rank identically under both models.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::model::{ApplicantId, ScoreModel, ScoredRecord};

/// Ranks for one model, keyed by applicant id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankTable {
    model: ScoreModel,
    ranks: HashMap<ApplicantId, u32>,
}

impl RankTable {
    pub fn model(&self) -> ScoreModel {
        self.model
    }

    /// 1-based rank of an applicant, if it was part of the ranked batch.
    pub fn rank_of(&self, id: ApplicantId) -> Option<u32> {
        self.ranks.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

/// The comparator behind [`rank`]: higher score first, then name, then id.
pub fn rank_order(a: &ScoredRecord<'_>, b: &ScoredRecord<'_>, model: ScoreModel) -> Ordering {
    b.score(model)
        .total_cmp(&a.score(model))
        .then_with(|| a.applicant.name.cmp(&b.applicant.name))
        .then_with(|| a.id.cmp(&b.id))
}

/// Assign ranks `1..=N` to the records under the selected model.
pub fn rank(records: &[ScoredRecord<'_>], model: ScoreModel) -> RankTable {
    let mut order: Vec<&ScoredRecord<'_>> = records.iter().collect();
    order.sort_by(|a, b| rank_order(a, b, model));

    let ranks = order
        .iter()
        .enumerate()
        .map(|(pos, record)| (record.id, pos as u32 + 1))
        .collect();

    RankTable { model, ranks }
}

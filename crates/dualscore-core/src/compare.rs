//! Blind-vs-aware comparison of ranks and decisions.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::decision::Decision;
use crate::error::ScoringError;
use crate::model::{RankedRecord, ScoredRecord};
use crate::ranking::RankTable;

/// How an applicant's decision moved between the two models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shift {
    /// Same decision under both models.
    Unchanged,
    /// Rejected under blind, admitted under aware.
    Upshift,
    /// Admitted under blind, rejected under aware.
    Downshift,
}

impl Shift {
    pub fn classify(blind: Decision, aware: Decision) -> Self {
        match (blind, aware) {
            (Decision::Rejected, Decision::Admitted) => Shift::Upshift,
            (Decision::Admitted, Decision::Rejected) => Shift::Downshift,
            _ => Shift::Unchanged,
        }
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shift::Unchanged => write!(f, "-"),
            Shift::Upshift => write!(f, "up"),
            Shift::Downshift => write!(f, "down"),
        }
    }
}

/// `blind_rank - aware_rank`; positive means the aware model ranks the applicant higher.
pub fn rank_delta(blind_rank: u32, aware_rank: u32) -> i64 {
    i64::from(blind_rank) - i64::from(aware_rank)
}

/// Counts of decision flips across the batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disagreement {
    /// Rejected → Admitted.
    pub upshift_count: usize,
    /// Admitted → Rejected.
    pub downshift_count: usize,
}

impl Disagreement {
    pub fn from_records(records: &[RankedRecord]) -> Self {
        records.iter().fold(Self::default(), |mut acc, r| {
            match r.shift {
                Shift::Upshift => acc.upshift_count += 1,
                Shift::Downshift => acc.downshift_count += 1,
                Shift::Unchanged => {}
            }
            acc
        })
    }

    pub fn total(&self) -> usize {
        self.upshift_count + self.downshift_count
    }
}

/// Join scored records with both rank tables.
///
/// Every record must appear in both tables. A record missing from either
/// fails the join rather than shortening the output.
pub fn compare(
    records: &[ScoredRecord<'_>],
    blind_ranks: &RankTable,
    aware_ranks: &RankTable,
) -> Result<Vec<RankedRecord>, ScoringError> {
    let lookup = |table: &RankTable, id| {
        table.rank_of(id).ok_or(ScoringError::MissingRank {
            id,
            model: table.model(),
        })
    };

    records
        .iter()
        .map(|r| {
            let blind_rank = lookup(blind_ranks, r.id)?;
            let aware_rank = lookup(aware_ranks, r.id)?;
            Ok(RankedRecord {
                id: r.id,
                name: r.applicant.name.clone(),
                blind_score: r.blind_score,
                aware_score: r.aware_score,
                blind_decision: r.blind_decision,
                aware_decision: r.aware_decision,
                blind_rank,
                aware_rank,
                rank_delta: rank_delta(blind_rank, aware_rank),
                shift: Shift::classify(r.blind_decision, r.aware_decision),
                bonuses: r.bonuses.clone(),
            })
        })
        .collect()
}

//! Evaluation pipeline.
//!
//! Runs score → decide → rank → compare → summarize over one in-memory batch.
//! Every stage is a pure pass over the previous stage's output; the only
//! shared state is the read-only [`ScoreConfig`].

use std::collections::HashMap;
use std::time::Instant;

use uuid::Uuid;

use crate::compare::{compare, Disagreement};
use crate::config::ScoreConfig;
use crate::decision::decide;
use crate::error::ScoringError;
use crate::fairness::fairness_tables;
use crate::model::{Applicant, ApplicantId, ScoreModel, ScoredRecord};
use crate::ranking::rank;
use crate::report::EvaluationReport;
use crate::scoring::aware_breakdown;
use crate::statistics::compute_model_stats;

/// Score and decide one applicant under both models.
pub fn score_applicant<'a>(
    id: ApplicantId,
    applicant: &'a Applicant,
    config: &ScoreConfig,
) -> ScoredRecord<'a> {
    let breakdown = aware_breakdown(applicant, config);
    if breakdown.saturated() {
        tracing::debug!(
            "{}: bonuses capped at 1.0 (raw {:.3})",
            applicant.name,
            breakdown.raw_total()
        );
    }
    ScoredRecord {
        id,
        applicant,
        blind_score: breakdown.blind,
        aware_score: breakdown.aware,
        blind_decision: decide(breakdown.blind, config.cutoff),
        aware_decision: decide(breakdown.aware, config.cutoff),
        bonuses: breakdown.bonuses,
    }
}

/// Score every applicant, assigning ids from input position.
pub fn score_batch<'a>(applicants: &'a [Applicant], config: &ScoreConfig) -> Vec<ScoredRecord<'a>> {
    applicants
        .iter()
        .enumerate()
        .map(|(i, app)| score_applicant(ApplicantId(i), app, config))
        .collect()
}

/// Fail on the first display name that appears twice.
pub fn check_unique_names(applicants: &[Applicant]) -> Result<(), ScoringError> {
    let mut seen: HashMap<&str, ApplicantId> = HashMap::with_capacity(applicants.len());
    for (i, app) in applicants.iter().enumerate() {
        if let Some(&first) = seen.get(app.name.as_str()) {
            return Err(ScoringError::DuplicateName {
                name: app.name.clone(),
                first,
                second: ApplicantId(i),
            });
        }
        seen.insert(app.name.as_str(), ApplicantId(i));
    }
    Ok(())
}

/// Evaluate a batch under both models and compare the outcomes.
pub fn evaluate(
    applicants: &[Applicant],
    config: &ScoreConfig,
) -> Result<EvaluationReport, ScoringError> {
    config.validate()?;
    if applicants.is_empty() {
        return Err(ScoringError::EmptyInput);
    }
    check_unique_names(applicants)?;

    let start = Instant::now();
    tracing::info!(
        "evaluating {} applicants at cutoff {}",
        applicants.len(),
        config.cutoff
    );

    let scored = score_batch(applicants, config);
    let blind_ranks = rank(&scored, ScoreModel::Blind);
    let aware_ranks = rank(&scored, ScoreModel::Aware);
    let rows = compare(&scored, &blind_ranks, &aware_ranks)?;
    let disagreement = Disagreement::from_records(&rows);
    let fairness = fairness_tables(&scored, config);
    let model_stats = compute_model_stats(&rows);

    tracing::info!(
        "evaluation complete: {} upshifts, {} downshifts ({}us)",
        disagreement.upshift_count,
        disagreement.downshift_count,
        start.elapsed().as_micros()
    );

    Ok(EvaluationReport {
        id: Uuid::new_v4(),
        created_at: chrono::Utc::now(),
        config: config.clone(),
        rows,
        disagreement,
        model_stats,
        fairness,
    })
}

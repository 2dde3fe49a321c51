//! Evaluation report types with JSON persistence and markdown rendering.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::compare::{Disagreement, Shift};
use crate::config::ScoreConfig;
use crate::fairness::FairnessTable;
use crate::model::RankedRecord;
use crate::statistics::ModelStats;

/// A complete blind-vs-aware evaluation of one applicant batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Unique run identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Configuration the batch was scored with.
    pub config: ScoreConfig,
    /// One row per applicant, in input order.
    pub rows: Vec<RankedRecord>,
    /// Decision flips between the models.
    pub disagreement: Disagreement,
    /// Per-model aggregates, blind first.
    pub model_stats: Vec<ModelStats>,
    /// One table per group predicate.
    pub fairness: Vec<FairnessTable>,
}

impl EvaluationReport {
    pub fn applicant_count(&self) -> usize {
        self.rows.len()
    }

    /// Look up a row by display name.
    pub fn row(&self, name: &str) -> Option<&RankedRecord> {
        self.rows.iter().find(|r| r.name == name)
    }

    /// Rows whose decision differs between the models.
    pub fn flips(&self) -> impl Iterator<Item = &RankedRecord> {
        self.rows.iter().filter(|r| r.shift != Shift::Unchanged)
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: EvaluationReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Format the report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "## Admissions Results (cutoff = {})\n\n",
            self.config.cutoff
        ));
        md.push_str("| Name | Blind | Aware | B.Dec | A.Dec | BRank | ARank | ΔRank | Bonuses |\n");
        md.push_str("|------|-------|-------|-------|-------|-------|-------|-------|---------|\n");
        for r in &self.rows {
            md.push_str(&format!(
                "| {} | {:.2} | {:.2} | {} | {} | {} | {} | {:+} | {} |\n",
                md_escape(&r.name),
                r.blind_score,
                r.aware_score,
                r.blind_decision,
                r.aware_decision,
                r.blind_rank,
                r.aware_rank,
                r.rank_delta,
                md_escape(&r.bonus_summary())
            ));
        }
        md.push('\n');

        md.push_str("### Disagreement (Blind vs Aware)\n\n");
        md.push_str(&format!(
            "- Rejected → Admitted (aware uplift): {}\n",
            self.disagreement.upshift_count
        ));
        md.push_str(&format!(
            "- Admitted → Rejected (aware downshift): {}\n\n",
            self.disagreement.downshift_count
        ));

        for table in &self.fairness {
            md.push_str(&format!("### Group: {}\n\n", table.group));
            md.push_str("| Model | In-group | Out-group |\n");
            md.push_str("|-------|----------|-----------|\n");
            for summary in [&table.blind, &table.aware] {
                md.push_str(&format!(
                    "| {} | {:.1}% | {:.1}% |\n",
                    summary.model,
                    summary.in_group_rate * 100.0,
                    summary.out_group_rate * 100.0
                ));
            }
            md.push('\n');
        }

        md
    }
}

/// Escape characters that would break a markdown table cell.
fn md_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('|', "\\|")
}

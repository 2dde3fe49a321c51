//! The `dualscore run` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use dualscore_core::config::load_config_from;
use dualscore_core::engine::evaluate;
use dualscore_core::error::ScoringError;
use dualscore_core::parser;
use dualscore_core::report::EvaluationReport;
use dualscore_report::write_html_report;

pub fn execute(
    input: PathBuf,
    cutoff: Option<String>,
    config_path: Option<PathBuf>,
    output: PathBuf,
    format: String,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?.with_cutoff_override(cutoff.as_deref());
    let applicants = parser::parse_applicants(&input)?;

    tracing::debug!(applicants = applicants.len(), cutoff = config.cutoff, "parsed input");

    let report = match evaluate(&applicants, &config) {
        Ok(report) => report,
        Err(ScoringError::EmptyInput) => {
            anyhow::bail!(
                "No applicants found in {}. Check CSV format or path.",
                input.display()
            );
        }
        Err(e) => return Err(e.into()),
    };

    print_results(&report);
    print_disagreement(&report);
    print_fairness(&report);

    save_reports(&report, &output, &format)
}

fn save_reports(report: &EvaluationReport, output: &Path, format: &str) -> Result<()> {
    let formats: Vec<&str> = match format {
        "none" => return Ok(()),
        "all" => vec!["json", "html", "markdown"],
        other => other.split(',').map(str::trim).collect(),
    };

    std::fs::create_dir_all(output)
        .with_context(|| format!("failed to create output directory {}", output.display()))?;
    let timestamp = report.created_at.format("%Y-%m-%dT%H%M%S");

    for fmt in formats {
        match fmt {
            "json" => {
                let path = output.join(format!("report-{timestamp}.json"));
                report.save_json(&path)?;
                eprintln!("Results saved to: {}", path.display());
            }
            "html" => {
                let path = output.join(format!("report-{timestamp}.html"));
                write_html_report(report, &path)?;
                eprintln!("HTML report: {}", path.display());
            }
            "markdown" | "md" => {
                let path = output.join(format!("report-{timestamp}.md"));
                std::fs::write(&path, report.to_markdown())
                    .with_context(|| format!("failed to write {}", path.display()))?;
                eprintln!("Markdown report: {}", path.display());
            }
            _ => {
                tracing::warn!("unknown report format '{fmt}', skipping");
            }
        }
    }

    Ok(())
}

fn print_results(report: &EvaluationReport) {
    println!("=== Admissions Results (cutoff = {}) ===", report.config.cutoff);

    let mut table = Table::new();
    table.set_header(vec![
        "Name", "Blind", "Aware", "B.Dec", "A.Dec", "BRank", "ARank", "ΔRank", "Bonuses",
    ]);

    for r in &report.rows {
        table.add_row(vec![
            Cell::new(&r.name),
            Cell::new(format!("{:.2}", r.blind_score)),
            Cell::new(format!("{:.2}", r.aware_score)),
            Cell::new(r.blind_decision),
            Cell::new(r.aware_decision),
            Cell::new(r.blind_rank),
            Cell::new(r.aware_rank),
            Cell::new(format!("{:+}", r.rank_delta)),
            Cell::new(r.bonus_summary()),
        ]);
    }

    println!("{table}");
}

fn print_disagreement(report: &EvaluationReport) {
    println!("\n=== Disagreement (Blind vs Aware) ===");
    println!(
        "Rejected→Admitted (Aware uplift): {}",
        report.disagreement.upshift_count
    );
    println!(
        "Admitted→Rejected (Aware downshift): {}",
        report.disagreement.downshift_count
    );
}

fn print_fairness(report: &EvaluationReport) {
    for fairness in &report.fairness {
        println!("\n=== Group: {} ===", fairness.group);

        let mut table = Table::new();
        table.set_header(vec!["Model", "In-group", "Out-group"]);
        for summary in [&fairness.blind, &fairness.aware] {
            table.add_row(vec![
                Cell::new(summary.model),
                Cell::new(format!(
                    "{:.1}% (n={})",
                    summary.in_group_rate * 100.0,
                    summary.in_group_size
                )),
                Cell::new(format!(
                    "{:.1}% (n={})",
                    summary.out_group_rate * 100.0,
                    summary.out_group_size
                )),
            ]);
        }
        println!("{table}");
    }
}

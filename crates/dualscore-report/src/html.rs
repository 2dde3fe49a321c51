//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS/JS inlined.

use anyhow::{Context, Result};
use std::path::Path;

use dualscore_core::compare::Shift;
use dualscore_core::fairness::FairnessTable;
use dualscore_core::report::EvaluationReport;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Generate an HTML report from an evaluation report.
pub fn generate_html(report: &EvaluationReport) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>dualscore report — cutoff {}</title>\n",
        report.config.cutoff
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>dualscore report</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">{} applicants | cutoff {} | {}</p>\n",
        report.applicant_count(),
        report.config.cutoff,
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Summary dashboard
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Summary</h2>\n");

    html.push_str("<table class=\"summary\">\n");
    html.push_str("<thead><tr><th>Model</th><th>Admitted</th><th>Admit %</th><th>Mean score</th><th>Min</th><th>Max</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for stats in &report.model_stats {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{:.1}%</td><td>{:.3}</td><td>{:.3}</td><td>{:.3}</td></tr>\n",
            stats.model,
            stats.admitted,
            stats.admit_rate * 100.0,
            stats.mean_score,
            stats.min_score,
            stats.max_score,
        ));
    }
    html.push_str("</tbody></table>\n");

    html.push_str(&format!(
        "<p>Rejected → Admitted (aware uplift): <strong>{}</strong> | Admitted → Rejected (aware downshift): <strong>{}</strong></p>\n",
        report.disagreement.upshift_count, report.disagreement.downshift_count
    ));
    html.push_str("</section>\n");

    // Fairness
    html.push_str("<section class=\"fairness\">\n");
    html.push_str("<h2>Group admit rates</h2>\n");
    html.push_str("<table class=\"fairness-table\">\n");
    html.push_str("<thead><tr><th>Group</th><th>In / Out</th><th>Blind in</th><th>Blind out</th><th>Aware in</th><th>Aware out</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for table in &report.fairness {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{} / {}</td><td>{:.1}%</td><td>{:.1}%</td><td>{:.1}%</td><td>{:.1}%</td></tr>\n",
            html_escape(table.group.label()),
            table.blind.in_group_size,
            table.blind.out_group_size,
            table.blind.in_group_rate * 100.0,
            table.blind.out_group_rate * 100.0,
            table.aware.in_group_rate * 100.0,
            table.aware.out_group_rate * 100.0,
        ));
    }
    html.push_str("</tbody></table>\n");

    if !report.fairness.is_empty() {
        html.push_str(&generate_bar_chart(&report.fairness));
    }
    html.push_str("</section>\n");

    // Per-applicant results
    html.push_str("<section class=\"results\">\n");
    html.push_str("<h2>Results</h2>\n");
    html.push_str("<table class=\"results-table\" id=\"results\">\n");
    html.push_str("<thead><tr><th onclick=\"sortTable(0)\">Name</th><th onclick=\"sortTable(1)\">Blind</th><th onclick=\"sortTable(2)\">Aware</th><th onclick=\"sortTable(3)\">B.Dec</th><th onclick=\"sortTable(4)\">A.Dec</th><th onclick=\"sortTable(5)\">BRank</th><th onclick=\"sortTable(6)\">ARank</th><th onclick=\"sortTable(7)\">ΔRank</th><th onclick=\"sortTable(8)\">Bonuses</th></tr></thead>\n");
    html.push_str("<tbody>\n");

    for r in &report.rows {
        let row_class = match r.shift {
            Shift::Upshift => "up",
            Shift::Downshift => "down",
            Shift::Unchanged => "",
        };

        html.push_str(&format!(
            "<tr class=\"{}\"><td>{}</td><td>{:.2}</td><td>{:.2}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{:+}</td><td>{}</td></tr>\n",
            row_class,
            html_escape(&r.name),
            r.blind_score,
            r.aware_score,
            r.blind_decision,
            r.aware_decision,
            r.blind_rank,
            r.aware_rank,
            r.rank_delta,
            html_escape(&r.bonus_summary())
        ));
    }

    html.push_str("</tbody></table>\n");
    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(
        &serde_json::to_string_pretty(report)
            .unwrap_or_default()
            .replace('<', "&lt;")
            .replace('>', "&gt;"),
    );
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    // JavaScript for sorting
    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &EvaluationReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    std::fs::write(path, html)
        .with_context(|| format!("failed to write HTML report to {}", path.display()))?;
    Ok(())
}

/// Paired blind/aware bars of the in-group admit rate for every group.
fn generate_bar_chart(tables: &[FairnessTable]) -> String {
    let bar_height = 14;
    let group_gap = 16;
    let max_width = 400;
    let label_width = 160;
    let row_height = bar_height * 2 + group_gap;

    let total_height = tables.len() * row_height + group_gap;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, table) in tables.iter().enumerate() {
        let y = i * row_height + group_gap;

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">{}</text>\n",
            label_width - 10,
            y + bar_height,
            html_escape(table.group.label())
        ));

        let bars = [
            (table.blind.in_group_rate, "#64748b"),
            (table.aware.in_group_rate, "#22c55e"),
        ];
        for (j, (rate, color)) in bars.iter().enumerate() {
            let bar_y = y + j * bar_height;
            let width = (rate * max_width as f64) as usize;
            svg.push_str(&format!(
                "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"3\"/>\n",
                label_width,
                bar_y,
                width,
                bar_height - 2,
                color
            ));
            svg.push_str(&format!(
                "  <text x=\"{}\" y=\"{}\" font-size=\"11\" fill=\"currentColor\" dominant-baseline=\"middle\">{:.1}%</text>\n",
                label_width + width + 8,
                bar_y + bar_height / 2,
                rate * 100.0
            ));
        }
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --up: #dcfce7; --down: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --up: #064e3b; --down: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); cursor: pointer; }
.up { background: var(--up); }
.down { background: var(--down); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;

const JS: &str = r#"
function sortTable(col) {
  const table = document.getElementById('results');
  const tbody = table.querySelector('tbody');
  const rows = Array.from(tbody.querySelectorAll('tr'));
  const asc = table.dataset.sortCol == col && table.dataset.sortDir == 'asc' ? false : true;
  rows.sort((a, b) => {
    const va = a.cells[col].textContent;
    const vb = b.cells[col].textContent;
    const na = parseFloat(va), nb = parseFloat(vb);
    if (!isNaN(na) && !isNaN(nb)) return asc ? na - nb : nb - na;
    return asc ? va.localeCompare(vb) : vb.localeCompare(va);
  });
  table.dataset.sortCol = col;
  table.dataset.sortDir = asc ? 'asc' : 'desc';
  rows.forEach(r => tbody.appendChild(r));
}
"#;

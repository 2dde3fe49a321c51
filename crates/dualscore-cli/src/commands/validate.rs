//! The `dualscore validate` command.

use std::path::PathBuf;

use anyhow::Result;

use dualscore_core::config::{config_warnings, load_config_from};
use dualscore_core::parser;

pub fn execute(input: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    config.validate()?;

    let applicants = parser::parse_applicants(&input)?;
    println!("Applicants: {} ({})", applicants.len(), input.display());

    let mut total_warnings = 0;

    for message in config_warnings(&config) {
        println!("  [config] WARNING: {message}");
        total_warnings += 1;
    }

    if applicants.is_empty() {
        println!("  WARNING: no applicants found");
        total_warnings += 1;
    }

    let warnings = parser::validate_applicants(&applicants, &config);
    for w in &warnings {
        let prefix = w
            .applicant
            .as_ref()
            .map(|name| format!("  [{name}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }
    total_warnings += warnings.len();

    if total_warnings == 0 {
        println!("All applicants valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}

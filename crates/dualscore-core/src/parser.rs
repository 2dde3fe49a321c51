//! CSV applicant parser.
//!
//! Loads applicant batches from CSV (or tab-separated) files with a header
//! row and validates them. Rows that can't be parsed are skipped with a warning; the rest of
//! the batch is still returned.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::ScoreConfig;
use crate::model::Applicant;

/// Number of columns a row must have.
pub const COLUMN_COUNT: usize = 14;

/// Expected header, in column order.
pub const HEADER: [&str; COLUMN_COUNT] = [
    "Name",
    "Age",
    "Geography",
    "Ethnicity",
    "Income",
    "Legacy",
    "Local",
    "GPA",
    "Test",
    "Extra",
    "Essay",
    "Rec",
    "FirstGen",
    "Disability",
];

/// Parse a CSV file into applicants.
pub fn parse_applicants(path: &Path) -> Result<Vec<Applicant>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open applicant file: {}", path.display()))?;
    read_applicants(file).with_context(|| format!("failed to read CSV: {}", path.display()))
}

/// Parse a CSV string into applicants (useful for testing).
pub fn parse_applicants_str(content: &str) -> Result<Vec<Applicant>> {
    read_applicants(content.as_bytes())
}

/// Parse applicants from any reader. The first row is treated as a header.
///
/// The delimiter is taken from the header: tab when it contains tabs and no
/// commas, comma otherwise.
pub fn read_applicants<R: Read>(mut reader: R) -> Result<Vec<Applicant>> {
    let mut content = Vec::new();
    reader
        .read_to_end(&mut content)
        .context("failed to read applicant data")?;
    let delimiter = sniff_delimiter(&content);

    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .delimiter(delimiter)
        .from_reader(content.as_slice());

    let mut applicants = Vec::new();
    for record in csv_reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(e) if e.is_io_error() => {
                return Err(e).context("failed to read CSV record");
            }
            Err(e) => {
                tracing::warn!("skipping malformed row: {e}");
                continue;
            }
        };
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        if record.iter().all(|field| field.is_empty()) {
            continue;
        }

        match parse_row(&record) {
            Ok(applicant) => applicants.push(applicant),
            Err(e) => {
                let raw: Vec<&str> = record.iter().collect();
                tracing::warn!("skipping malformed row at line {line}: {e} ({})", raw.join(","));
            }
        }
    }

    Ok(applicants)
}

/// Pick the field delimiter from the header line.
fn sniff_delimiter(content: &[u8]) -> u8 {
    let header = content
        .split(|&b| b == b'\n')
        .next()
        .unwrap_or_default();
    if header.contains(&b'\t') && !header.contains(&b',') {
        b'\t'
    } else {
        b','
    }
}

fn parse_row(record: &csv::StringRecord) -> Result<Applicant> {
    if record.len() < COLUMN_COUNT {
        anyhow::bail!("expected {COLUMN_COUNT} columns, found {}", record.len());
    }
    let field = |i: usize| record.get(i).unwrap_or_default();

    Ok(Applicant {
        name: field(0).to_string(),
        age: field(1)
            .parse()
            .with_context(|| format!("invalid age '{}'", field(1)))?,
        geography: field(2).to_string(),
        ethnicity: field(3).to_string(),
        income: parse_income(field(4))?,
        legacy: parse_flag(field(5)),
        local: parse_flag(field(6)),
        gpa: parse_number("gpa", field(7))?,
        test: parse_number("test", field(8))?,
        extra: parse_number("extra", field(9))?,
        essay: parse_number("essay", field(10))?,
        rec: parse_number("rec", field(11))?,
        first_gen: parse_flag(field(12)),
        disability: parse_flag(field(13)),
    })
}

fn parse_number(column: &str, raw: &str) -> Result<f64> {
    raw.parse::<f64>()
        .with_context(|| format!("invalid {column} '{raw}'"))
}

/// Parse an income like `$40,000` or `52000.50`.
fn parse_income(raw: &str) -> Result<f64> {
    let cleaned: String = raw.chars().filter(|c| *c != '$' && *c != ',').collect();
    parse_number("income", cleaned.trim())
}

/// `Yes` in any case is true; everything else is false.
fn parse_flag(raw: &str) -> bool {
    raw.eq_ignore_ascii_case("yes")
}

/// A warning from applicant validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The applicant name (if applicable).
    pub applicant: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a batch for issues the engine would otherwise absorb silently.
///
/// Out-of-range and non-finite features are clamped or zeroed during
/// scoring; this surfaces them so the input can be fixed upstream.
pub fn validate_applicants(applicants: &[Applicant], config: &ScoreConfig) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let mut seen_names = HashSet::new();
    for app in applicants {
        if app.name.trim().is_empty() {
            warnings.push(ValidationWarning {
                applicant: None,
                message: "applicant with empty name".into(),
            });
        } else if !seen_names.insert(app.name.as_str()) {
            warnings.push(ValidationWarning {
                applicant: Some(app.name.clone()),
                message: format!("duplicate applicant name: {}", app.name),
            });
        }
    }

    for app in applicants {
        let mut warn = |message: String| {
            warnings.push(ValidationWarning {
                applicant: Some(app.name.clone()),
                message,
            })
        };

        let ranged = [
            ("gpa", app.gpa, config.max_gpa),
            ("test", app.test, config.max_test),
            ("extra", app.extra, 1.0),
            ("essay", app.essay, 1.0),
            ("rec", app.rec, 1.0),
        ];
        for (column, value, max) in ranged {
            if !value.is_finite() {
                warn(format!("{column} is not a finite number and will score as 0"));
            } else if !(0.0..=max).contains(&value) {
                warn(format!("{column} {value} is outside [0, {max}] and will be clamped"));
            }
        }

        if !app.income.is_finite() {
            warn("income is not a finite number".into());
        } else if app.income < 0.0 {
            warn(format!("income {} is negative", app.income));
        }
    }

    warnings
}

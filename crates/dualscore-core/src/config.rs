//! Score configuration and loading.
//!
//! A [`ScoreConfig`] is built once before a run and passed by reference into
//! every scoring and decision call. It is loaded from TOML, then selected
//! values may be overridden from the environment or the command line.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::ScoringError;

/// Environment variable overriding [`ScoreConfig::max_test`].
pub const ENV_MAX_TEST: &str = "DUALSCORE_MAX_TEST";
/// Environment variable overriding [`ScoreConfig::low_income_threshold`].
pub const ENV_LOW_INCOME: &str = "DUALSCORE_LOW_INCOME";
/// Environment variable overriding [`ScoreConfig::cutoff`].
pub const ENV_CUTOFF: &str = "DUALSCORE_CUTOFF";

/// Weights of the merit-only (blind) model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BlindWeights {
    pub gpa: f64,
    pub test: f64,
    pub extra: f64,
    pub essay: f64,
    pub rec: f64,
}

impl Default for BlindWeights {
    fn default() -> Self {
        Self {
            gpa: 0.45,
            test: 0.30,
            extra: 0.10,
            essay: 0.10,
            rec: 0.05,
        }
    }
}

impl BlindWeights {
    pub fn sum(&self) -> f64 {
        self.entries().iter().map(|(_, w)| w).sum()
    }

    /// Weights paired with their TOML key.
    pub fn entries(&self) -> [(&'static str, f64); 5] {
        [
            ("gpa", self.gpa),
            ("test", self.test),
            ("extra", self.extra),
            ("essay", self.essay),
            ("rec", self.rec),
        ]
    }
}

/// Additive bonuses of the equity-adjusted (aware) model.
///
/// A magnitude may be zero to neutralize a factor or negative to penalize it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Bonuses {
    pub low_income: f64,
    pub first_gen: f64,
    pub disability: f64,
    pub legacy: f64,
    pub local: f64,
}

impl Default for Bonuses {
    fn default() -> Self {
        Self {
            low_income: 0.05,
            first_gen: 0.05,
            disability: 0.03,
            legacy: 0.02,
            local: 0.03,
        }
    }
}

impl Bonuses {
    /// Returns `true` if no bonus can lower a score.
    pub fn all_non_negative(&self) -> bool {
        self.entries().iter().all(|(_, b)| *b >= 0.0)
    }

    /// Bonuses paired with their TOML key.
    pub fn entries(&self) -> [(&'static str, f64); 5] {
        [
            ("low_income", self.low_income),
            ("first_gen", self.first_gen),
            ("disability", self.disability),
            ("legacy", self.legacy),
            ("local", self.local),
        ]
    }
}

/// Run-wide scoring configuration.
///
/// Example TOML:
/// ```toml
/// max_gpa = 4.0
/// max_test = 36
/// cutoff = 0.80
///
/// [weights]
/// gpa = 0.5
///
/// [bonuses]
/// legacy = 0.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScoreConfig {
    /// Top of the GPA scale.
    #[serde(default = "default_max_gpa")]
    pub max_gpa: f64,
    /// Top of the test-score scale (1600 for SAT, 36 for ACT).
    #[serde(default = "default_max_test")]
    pub max_test: f64,
    /// Incomes strictly below this earn the low-income bonus.
    #[serde(default = "default_low_income_threshold")]
    pub low_income_threshold: f64,
    /// Scores at or above this are admitted, under both models.
    #[serde(default = "default_cutoff")]
    pub cutoff: f64,
    #[serde(default)]
    pub weights: BlindWeights,
    #[serde(default)]
    pub bonuses: Bonuses,
}

fn default_max_gpa() -> f64 {
    4.0
}
fn default_max_test() -> f64 {
    1600.0
}
fn default_low_income_threshold() -> f64 {
    40_000.0
}
fn default_cutoff() -> f64 {
    0.82
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            max_gpa: default_max_gpa(),
            max_test: default_max_test(),
            low_income_threshold: default_low_income_threshold(),
            cutoff: default_cutoff(),
            weights: BlindWeights::default(),
            bonuses: Bonuses::default(),
        }
    }
}

impl ScoreConfig {
    /// Check the hard invariants the scoring engine relies on.
    pub fn validate(&self) -> Result<(), ScoringError> {
        if !(self.max_gpa.is_finite() && self.max_gpa > 0.0) {
            return Err(ScoringError::InvalidConfig(format!(
                "max_gpa must be a positive number, got {}",
                self.max_gpa
            )));
        }
        if !(self.max_test.is_finite() && self.max_test > 0.0) {
            return Err(ScoringError::InvalidConfig(format!(
                "max_test must be a positive number, got {}",
                self.max_test
            )));
        }
        if !(self.low_income_threshold.is_finite() && self.low_income_threshold >= 0.0) {
            return Err(ScoringError::InvalidConfig(format!(
                "low_income_threshold must be a non-negative number, got {}",
                self.low_income_threshold
            )));
        }
        if !self.cutoff.is_finite() {
            return Err(ScoringError::InvalidConfig(format!(
                "cutoff must be finite, got {}",
                self.cutoff
            )));
        }
        for (name, value) in self.weights.entries() {
            if !value.is_finite() {
                return Err(ScoringError::InvalidConfig(format!(
                    "weight '{name}' must be finite, got {value}"
                )));
            }
        }
        for (name, value) in self.bonuses.entries() {
            if !value.is_finite() {
                return Err(ScoringError::InvalidConfig(format!(
                    "bonus '{name}' must be finite, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Apply a cutoff given as text; malformed values leave the current cutoff in place.
    pub fn with_cutoff_override(mut self, raw: Option<&str>) -> Self {
        if let Some(raw) = raw {
            match parse_override(raw) {
                Some(cutoff) => self.cutoff = cutoff,
                None => tracing::debug!("ignoring malformed cutoff override '{raw}'"),
            }
        }
        self
    }

    /// Apply the `DUALSCORE_*` environment overrides.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary key lookup (the environment in production).
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let targets: [(&str, &mut f64); 3] = [
            (ENV_MAX_TEST, &mut self.max_test),
            (ENV_LOW_INCOME, &mut self.low_income_threshold),
            (ENV_CUTOFF, &mut self.cutoff),
        ];
        for (key, slot) in targets {
            let Some(raw) = lookup(key) else {
                continue;
            };
            match parse_override(&raw) {
                Some(value) => *slot = value,
                None => tracing::debug!("ignoring malformed {key}='{raw}'"),
            }
        }
    }
}

/// Parse a numeric override, rejecting anything that is not a finite number.
fn parse_override(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Soft issues worth telling the user about; none of them stop a run.
pub fn config_warnings(config: &ScoreConfig) -> Vec<String> {
    let mut warnings = Vec::new();

    let sum = config.weights.sum();
    if (sum - 1.0).abs() > 1e-9 {
        warnings.push(format!("blind weights sum to {sum:.3}, not 1.0"));
    }

    for (name, value) in config.bonuses.entries() {
        if value < 0.0 {
            warnings.push(format!("bonus '{name}' is negative ({value}) and penalizes applicants"));
        }
    }

    if !(0.0..=1.0).contains(&config.cutoff) {
        warnings.push(format!(
            "cutoff {} is outside [0, 1]; every applicant gets the same decision",
            config.cutoff
        ));
    }

    warnings
}

/// Load config from an explicit path, or search the well-known locations.
///
/// Search order when no path is given:
/// 1. `dualscore.toml` in the current directory
/// 2. `~/.config/dualscore/config.toml`
///
/// Environment variable overrides: `DUALSCORE_MAX_TEST`, `DUALSCORE_LOW_INCOME`,
/// `DUALSCORE_CUTOFF`.
pub fn load_config_from(path: Option<&Path>) -> Result<ScoreConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("dualscore.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading score config from {}", path.display());
            parse_config_file(&path)?
        }
        None => ScoreConfig::default(),
    };

    config.apply_env_overrides();
    Ok(config)
}

fn parse_config_file(path: &Path) -> Result<ScoreConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str::<ScoreConfig>(&content)
        .with_context(|| format!("failed to parse config: {}", path.display()))
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("dualscore"))
}

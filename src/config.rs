use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "SymptomTriage";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Environment variable overriding the reference catalog directory.
pub const CATALOG_ENV: &str = "SYMPTOM_TRIAGE_CATALOG";

/// Default `tracing` filter when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "symptom_triage=info"
}

/// Get the application data directory (~/SymptomTriage/).
pub fn app_data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(APP_NAME))
}

/// Directory holding a user-supplied catalog.
/// `$SYMPTOM_TRIAGE_CATALOG` wins, then ~/SymptomTriage/catalog.
pub fn catalog_dir() -> Option<PathBuf> {
    match std::env::var_os(CATALOG_ENV) {
        Some(dir) if !dir.is_empty() => Some(PathBuf::from(dir)),
        _ => app_data_dir().map(|dir| dir.join("catalog")),
    }
}

// ═══════════════════════════════════════════
// Engine tunables
// ═══════════════════════════════════════════

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config read failed ({0}): {1}")]
    Read(String, #[source] std::io::Error),

    #[error("Config parse failed ({0}): {1}")]
    Parse(String, #[source] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Ranking and scoring knobs. Triage thresholds live in the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum candidates returned (N).
    pub top_n: usize,
    /// How many top raw scores form the probability denominator (K >= N).
    pub normalization_depth: usize,
    /// Raw scores below this are never surfaced.
    pub min_significance: f64,
    /// Top candidate probability required to name it as the main disease.
    pub min_confidence: f64,
    /// Raw score that maps to 1.0 when rescaling for severity.
    pub score_normalization: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            top_n: 3,
            normalization_depth: 5,
            min_significance: 0.5,
            min_confidence: 0.25,
            score_normalization: 5.0,
        }
    }
}

impl EngineConfig {
    /// Read a JSON config file; absent keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(path.display().to_string(), e))?;
        let config: Self = serde_json::from_str(&json)
            .map_err(|e| ConfigError::Parse(path.display().to_string(), e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.top_n == 0 {
            return Err(ConfigError::Invalid("top_n must be at least 1".into()));
        }
        if self.normalization_depth < self.top_n {
            return Err(ConfigError::Invalid(format!(
                "normalization_depth ({}) must be >= top_n ({})",
                self.normalization_depth, self.top_n
            )));
        }
        if !self.min_significance.is_finite() || self.min_significance < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "min_significance must be a non-negative number, got {}",
                self.min_significance
            )));
        }
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(ConfigError::Invalid(format!(
                "min_confidence must be within [0, 1], got {}",
                self.min_confidence
            )));
        }
        if !self.score_normalization.is_finite() || self.score_normalization <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "score_normalization must be positive, got {}",
                self.score_normalization
            )));
        }
        Ok(())
    }
}

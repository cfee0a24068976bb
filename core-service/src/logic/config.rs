//! Detector Configuration
//!
//! Model locations (from env) and scoring rules (built-in or JSON file).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::logic::signals::UrgencyMatcher;
use crate::logic::threat::{AnomalyRules, PhishingRules};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read rules file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse rules file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid urgency pattern: {0}")]
    Pattern(#[from] regex::Error),
}

// ============================================================================
// MODEL CONFIG
// ============================================================================

/// Where models live and whether to try loading them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelConfig {
    /// Directory holding `model.onnx` + `vocab.txt` for the sentiment model
    pub model_dir: PathBuf,
    /// Kill-switch for every statistical model
    pub enabled: bool,
    /// Expected SHA-256 of `model.onnx`
    pub sentiment_sha256: Option<String>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_dir: default_model_dir(),
            enabled: true,
            sentiment_sha256: None,
        }
    }
}

impl ModelConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            model_dir: constants::get_model_dir()
                .map(PathBuf::from)
                .unwrap_or_else(default_model_dir),
            enabled: !constants::models_disabled(),
            sentiment_sha256: constants::get_sentiment_checksum(),
        }
    }

    /// Heuristics only
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    pub fn sentiment_model_path(&self) -> PathBuf {
        self.model_dir.join("sentiment").join("model.onnx")
    }

    pub fn sentiment_vocab_path(&self) -> PathBuf {
        self.model_dir.join("sentiment").join("vocab.txt")
    }
}

/// `<data-local-dir>/cyberguard/models`, or `./models` when unknown
fn default_model_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join(constants::MODEL_DIR_NAME).join("models"))
        .unwrap_or_else(|| PathBuf::from("models"))
}

// ============================================================================
// RULE SET
// ============================================================================

/// Both detectors' rules, as stored in a JSON rules file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    pub phishing: PhishingRules,
    pub anomaly: AnomalyRules,
}

impl RuleSet {
    /// Missing sections/fields fall back to the built-in defaults
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let rules: RuleSet = serde_json::from_str(content)?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        UrgencyMatcher::new(&self.phishing.urgency_pattern)?;
        Ok(())
    }
}

//! Central Configuration Constants
//!
//! Single source of truth for scoring defaults.

/// Lower bound of every score
pub const MIN_SCORE: f64 = 0.0;

/// Upper bound of every score
pub const MAX_SCORE: f64 = 100.0;

/// Number of body characters handed to the sentiment model
pub const SENTIMENT_MAX_CHARS: usize = 512;

/// Max tokens (including [CLS]/[SEP]) fed to the sentiment model
pub const SENTIMENT_MAX_TOKENS: usize = 512;

/// Label the sentiment model uses for negative text
pub const NEGATIVE_LABEL: &str = "NEGATIVE";

/// Feature count of a network flow vector:
/// [source_port, dest_port, packet_count, protocol_code]
pub const FLOW_FEATURE_COUNT: usize = 4;

/// Isolation forest: expected outlier fraction
pub const OUTLIER_CONTAMINATION: f64 = 0.1;

/// Isolation forest: fixed seed for trees and synthetic data
pub const OUTLIER_RANDOM_SEED: u64 = 42;

/// Isolation forest: number of trees
pub const OUTLIER_ESTIMATORS: usize = 100;

/// Rows of synthetic data used to pre-fit the outlier model
pub const SYNTHETIC_SAMPLES: usize = 10;

/// Default model directory name under the platform data dir
pub const MODEL_DIR_NAME: &str = "cyberguard";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Model directory from environment, if set
pub fn get_model_dir() -> Option<String> {
    std::env::var("CYBERGUARD_MODEL_DIR").ok()
}

/// Check if statistical models are disabled
pub fn models_disabled() -> bool {
    std::env::var("CYBERGUARD_DISABLE_MODELS")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Expected SHA-256 of the sentiment model file, if pinned
pub fn get_sentiment_checksum() -> Option<String> {
    std::env::var("CYBERGUARD_SENTIMENT_SHA256")
        .ok()
        .filter(|s| !s.trim().is_empty())
}

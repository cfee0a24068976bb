//! Model Module - Optional Statistical Models
//!
//! Separates model loading/inference from the scoring rules.
//! Every model is optional: a detector that cannot load one keeps
//! scoring with heuristics.
//!
//! ## Structure
//! - `handle`: lazy, load-once holder with explicit state
//! - `isolation_forest`: unsupervised outlier scorer for network flows
//! - `sentiment`: ONNX text classifier for email bodies
//! - `tokenizer`: WordPiece tokenizer feeding the sentiment model
//! - `checksum`: SHA-256 verification of model files

pub mod handle;
pub mod isolation_forest;
pub mod sentiment;
pub mod tokenizer;
pub mod checksum;

use serde::{Deserialize, Serialize};

// Re-export common types
pub use handle::{ModelHandle, ModelStatus};
pub use isolation_forest::{IsolationForest, IsolationForestConfig};
pub use sentiment::load_sentiment_classifier;
pub use tokenizer::WordPieceTokenizer;

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("model backend not compiled in (enable the `{0}` feature)")]
    BackendDisabled(&'static str),

    #[error("models disabled by configuration")]
    Disabled,

    #[error("model file not found: {0}")]
    NotFound(String),

    #[error("checksum mismatch for {path}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        path: String,
        expected: String,
        actual: String,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to load model: {0}")]
    Load(String),

    #[error("failed to fit model: {0}")]
    Fit(String),

    #[error("inference failed: {0}")]
    Inference(String),

    #[error("invalid model input: {0}")]
    InvalidInput(String),
}

// ============================================================================
// STATE
// ============================================================================

/// Initialization outcome of a model handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelState {
    /// Nobody asked for the model yet
    NotStarted,
    /// Loaded and usable
    Ready,
    /// Load attempted and failed; never retried
    Unavailable,
}

impl ModelState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelState::NotStarted => "not_started",
            ModelState::Ready => "ready",
            ModelState::Unavailable => "unavailable",
        }
    }
}

impl std::fmt::Display for ModelState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// MODEL TRAITS
// ============================================================================

/// Label + confidence from a text classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextVerdict {
    pub label: String,
    pub confidence: f32,
}

/// Trait for text classifiers (ONNX, test fakes, ...)
pub trait TextClassifier: Send + Sync {
    fn classify(&self, text: &str) -> Result<TextVerdict, ModelError>;
}

/// Trait for outlier scorers.
///
/// Returns a decision value where higher means more normal and negative
/// values are outliers.
pub trait OutlierScorer: Send + Sync {
    fn decision_function(&self, features: &[f64]) -> Result<f64, ModelError>;
}

impl<T: TextClassifier + ?Sized> TextClassifier for Box<T> {
    fn classify(&self, text: &str) -> Result<TextVerdict, ModelError> {
        (**self).classify(text)
    }
}

impl<T: OutlierScorer + ?Sized> OutlierScorer for Box<T> {
    fn decision_function(&self, features: &[f64]) -> Result<f64, ModelError> {
        (**self).decision_function(features)
    }
}

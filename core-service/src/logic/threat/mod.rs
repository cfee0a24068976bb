//! Threat Module
//!
//! Types, rules and aggregation shared by both detectors.
//!
//! ## Structure
//! - `types`: Inputs, SignalContribution, RiskTier, AnalysisResult
//! - `rules`: Weights, keyword lists and thresholds
//! - `aggregator`: Sum + clamp + dedup

pub mod types;
pub mod rules;
pub mod aggregator;

// Re-export main types for convenience
pub use types::{
    AnalysisResult,
    EmailMessage,
    NetworkFlow,
    RiskTier,
    SignalContribution,
};

pub use rules::{AnomalyRules, PhishingRules};

pub use aggregator::{aggregate, clamp_score, Aggregate};

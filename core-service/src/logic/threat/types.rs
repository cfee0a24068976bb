//! Threat Types
//!
//! Core types for scoring.
//! NO logic here - only data structures.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

// ============================================================================
// INPUTS
// ============================================================================

/// Email fields needed for phishing scoring
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub sender: String,
    pub subject: String,
    pub body: String,
    pub urls: Vec<String>,
}

/// Network flow fields needed for anomaly scoring
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkFlow {
    pub source_port: u16,
    pub dest_port: u16,
    pub packet_count: u64,
    pub protocol: String,
}

// ============================================================================
// SIGNAL CONTRIBUTION
// ============================================================================

/// One labeled score delta emitted by a signal extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalContribution {
    /// Human-readable reason, becomes a flag
    pub label: String,
    /// Non-negative score delta
    pub weight: f64,
}

impl SignalContribution {
    pub fn new(label: impl Into<String>, weight: f64) -> Self {
        Self {
            label: label.into(),
            weight: weight.max(0.0),
        }
    }
}

// ============================================================================
// RISK TIER
// ============================================================================

/// Discrete risk bucket derived from the final score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Medium => "medium",
            RiskTier::High => "high",
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// ANALYSIS RESULT
// ============================================================================

/// Verdict of a single `analyze` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Score in [0, 100]
    pub score: f64,
    /// Unique reasons
    pub flags: BTreeSet<String>,
    pub explanation: String,
    /// Only set for network verdicts, email uses score bands
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_tier: Option<RiskTier>,
}

impl AnalysisResult {
    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }

    /// Flags as a plain list (sorted)
    pub fn flag_list(&self) -> Vec<String> {
        self.flags.iter().cloned().collect()
    }
}

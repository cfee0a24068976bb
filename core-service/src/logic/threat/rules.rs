//! Scoring Rules & Thresholds
//!
//! Keyword lists, weights and tier cut-offs.
//! NO scoring logic here - only constants and config.

use serde::{Deserialize, Serialize};

// ============================================================================
// EMAIL WEIGHTS
// ============================================================================

/// URL contains a phishing keyword
pub const SUSPICIOUS_URL_WEIGHT: f64 = 25.0;

/// URL longer than `long_url_length`
pub const LONG_URL_WEIGHT: f64 = 10.0;

/// Sender matches a blocklisted domain
pub const BLOCKED_SENDER_WEIGHT: f64 = 40.0;

/// Sentiment model says NEGATIVE with high confidence
pub const NEGATIVE_SENTIMENT_WEIGHT: f64 = 30.0;

/// Urgency/scarcity wording in body or subject
pub const URGENCY_WEIGHT: f64 = 20.0;

/// Minimum model confidence for the sentiment signal (exclusive)
pub const NEGATIVE_SENTIMENT_CONFIDENCE: f32 = 0.8;

/// Email explanation bands (exclusive lower bounds)
pub const EMAIL_HIGH_RISK_ABOVE: f64 = 70.0;
pub const EMAIL_MEDIUM_RISK_ABOVE: f64 = 30.0;

// ============================================================================
// NETWORK THRESHOLDS
// ============================================================================

/// Packet count above which a flow is volumetric
pub const VOLUMETRIC_PACKET_THRESHOLD: u64 = 1000;
pub const VOLUMETRIC_SCORE: f64 = 75.0;

/// SSH / Telnet brute-force check
pub const REMOTE_ACCESS_PORTS: [u16; 2] = [22, 23];
pub const REMOTE_ACCESS_PACKET_THRESHOLD: u64 = 100;
pub const REMOTE_ACCESS_SCORE: f64 = 60.0;

/// Network tier cut-offs (exclusive lower bounds)
pub const NETWORK_HIGH_TIER_ABOVE: f64 = 80.0;
pub const NETWORK_MEDIUM_TIER_ABOVE: f64 = 50.0;

/// Default urgency regex (matched case-insensitively)
pub const DEFAULT_URGENCY_PATTERN: &str =
    r"(urgent|action required|suspended|immediate|limited time)";

/// Default URL keywords
pub const DEFAULT_URL_KEYWORDS: [&str; 7] = [
    "verify",
    "login",
    "account-update",
    "secure",
    "banking",
    "urgent",
    "gift",
];

/// Default blocklisted sender domains
pub const DEFAULT_SENDER_BLOCKLIST: [&str; 3] = [
    "@free-prize.com",
    "@security-verify.net",
    "@account-alert.io",
];

// ============================================================================
// CONFIGURABLE RULES (injected at detector construction)
// ============================================================================

/// Phishing rules (configurable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhishingRules {
    /// Case-insensitive substrings that make a URL suspicious
    pub url_keywords: Vec<String>,
    /// URLs strictly longer than this (in chars) are flagged
    pub long_url_length: usize,
    /// How many chars of a long URL go into the flag
    pub long_url_preview_chars: usize,
    /// Case-insensitive substrings of the sender address
    pub sender_blocklist: Vec<String>,
    /// Urgency regex, matched against lowercased body + subject
    pub urgency_pattern: String,
    pub suspicious_url_weight: f64,
    pub long_url_weight: f64,
    pub blocked_sender_weight: f64,
    pub negative_sentiment_weight: f64,
    pub negative_sentiment_confidence: f32,
    pub urgency_weight: f64,
    pub high_risk_above: f64,
    pub medium_risk_above: f64,
}

impl Default for PhishingRules {
    fn default() -> Self {
        Self {
            url_keywords: DEFAULT_URL_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            long_url_length: 100,
            long_url_preview_chars: 50,
            sender_blocklist: DEFAULT_SENDER_BLOCKLIST.iter().map(|s| s.to_string()).collect(),
            urgency_pattern: DEFAULT_URGENCY_PATTERN.to_string(),
            suspicious_url_weight: SUSPICIOUS_URL_WEIGHT,
            long_url_weight: LONG_URL_WEIGHT,
            blocked_sender_weight: BLOCKED_SENDER_WEIGHT,
            negative_sentiment_weight: NEGATIVE_SENTIMENT_WEIGHT,
            negative_sentiment_confidence: NEGATIVE_SENTIMENT_CONFIDENCE,
            urgency_weight: URGENCY_WEIGHT,
            high_risk_above: EMAIL_HIGH_RISK_ABOVE,
            medium_risk_above: EMAIL_MEDIUM_RISK_ABOVE,
        }
    }
}

/// Network anomaly rules (configurable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnomalyRules {
    pub volumetric_packet_threshold: u64,
    pub volumetric_score: f64,
    pub remote_access_ports: Vec<u16>,
    pub remote_access_packet_threshold: u64,
    pub remote_access_score: f64,
    pub high_tier_above: f64,
    pub medium_tier_above: f64,
}

impl Default for AnomalyRules {
    fn default() -> Self {
        Self {
            volumetric_packet_threshold: VOLUMETRIC_PACKET_THRESHOLD,
            volumetric_score: VOLUMETRIC_SCORE,
            remote_access_ports: REMOTE_ACCESS_PORTS.to_vec(),
            remote_access_packet_threshold: REMOTE_ACCESS_PACKET_THRESHOLD,
            remote_access_score: REMOTE_ACCESS_SCORE,
            high_tier_above: NETWORK_HIGH_TIER_ABOVE,
            medium_tier_above: NETWORK_MEDIUM_TIER_ABOVE,
        }
    }
}

//! CyberGuard Core - Scoring Engine
//!
//! Two independent detectors that turn security telemetry into a bounded
//! risk score, a set of reasons and a short explanation:
//!
//! - [`PhishingDetector`] scores inbound email (URLs, sender, body, subject).
//! - [`AnomalyDetector`] scores network flow records (ports, packets, protocol).
//!
//! Each detector runs deterministic heuristic signals and, when available, a
//! lazily loaded statistical model. A missing or broken model never fails an
//! analysis; the detector simply falls back to heuristics.
//!
//! ```ignore
//! use cyberguard_core::{EmailMessage, PhishingDetector};
//!
//! let detector = PhishingDetector::heuristic_only();
//! let result = detector.analyze(&EmailMessage {
//!     sender: "x@free-prize.com".into(),
//!     subject: "URGENT".into(),
//!     body: "account suspended, act now".into(),
//!     urls: vec!["http://a.com/verify-login".into()],
//! });
//! assert_eq!(result.score, 85.0);
//! ```

pub mod constants;
pub mod logic;

pub use logic::config::{ConfigError, ModelConfig, RuleSet};
pub use logic::detector::{AnomalyDetector, PhishingDetector};
pub use logic::model::{ModelError, ModelState, ModelStatus};
pub use logic::threat::{
    AnalysisResult, AnomalyRules, EmailMessage, NetworkFlow, PhishingRules, RiskTier,
    SignalContribution,
};

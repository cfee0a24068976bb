//! Detector Facades
//!
//! One per domain. Each composes signal extractors, an optional model and
//! the aggregator behind a single `analyze` call.
//!
//! ## Usage
//! ```ignore
//! use crate::logic::detector::AnomalyDetector;
//!
//! let detector = AnomalyDetector::new(AnomalyRules::default(), &ModelConfig::from_env());
//! let result = detector.analyze(&flow);
//! match result.risk_tier {
//!     Some(RiskTier::High) => println!("Action needed"),
//!     _ => println!("Monitor"),
//! }
//! ```

pub mod phishing;
pub mod anomaly;

#[cfg(test)]
mod tests;

pub use phishing::PhishingDetector;
pub use anomaly::AnomalyDetector;

//! Explanation Engine
//!
//! Maps a final score onto the human-readable explanation (and, for
//! network flows, the risk tier).

use crate::logic::threat::{AnomalyRules, NetworkFlow, PhishingRules, RiskTier};

pub const EMAIL_HIGH_RISK: &str = "High risk: Email contains multiple phishing signals including suspicious URLs and urgency tactics.";
pub const EMAIL_MEDIUM_RISK: &str = "Medium risk: Some suspicious elements detected, such as external links and urgent language.";
pub const EMAIL_NO_THREAT: &str = "No major threats detected.";

pub const NETWORK_MEDIUM_RISK: &str = "Moderate deviation from normal traffic patterns detected.";
pub const NETWORK_NORMAL: &str = "Network activity appears normal.";

/// Email score bands
pub fn explain_email(score: f64, rules: &PhishingRules) -> &'static str {
    if score > rules.high_risk_above {
        EMAIL_HIGH_RISK
    } else if score > rules.medium_risk_above {
        EMAIL_MEDIUM_RISK
    } else {
        EMAIL_NO_THREAT
    }
}

/// Network tier + description
pub fn explain_network(score: f64, flow: &NetworkFlow, rules: &AnomalyRules) -> (RiskTier, String) {
    if score > rules.high_tier_above {
        (
            RiskTier::High,
            format!(
                "Critical anomaly detected: Unusual activity on port {} with high packet count ({}). Possible DDoS or Port Scanning.",
                flow.dest_port, flow.packet_count
            ),
        )
    } else if score > rules.medium_tier_above {
        (RiskTier::Medium, NETWORK_MEDIUM_RISK.to_string())
    } else {
        (RiskTier::Low, NETWORK_NORMAL.to_string())
    }
}

//! Network log submission model

use cyberguard_core::{AnalysisResult, NetworkFlow, RiskTier};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::AppError;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NetworkLogInput {
    pub timestamp: Option<String>,
    pub source_ip: String,
    pub destination_ip: String,
    #[validate(range(min = 0, max = 65535, message = "Port must be between 0 and 65535"))]
    pub source_port: i64,
    #[validate(range(min = 0, max = 65535, message = "Port must be between 0 and 65535"))]
    pub destination_port: i64,
    pub protocol: String,
    #[validate(range(min = 0, message = "Packet count must be non-negative"))]
    pub packet_count: i64,
}

impl NetworkLogInput {
    pub fn to_flow(&self) -> Result<NetworkFlow, AppError> {
        let port = |p: i64| {
            u16::try_from(p)
                .map_err(|_| AppError::ValidationError("Port must be between 0 and 65535".to_string()))
        };

        Ok(NetworkFlow {
            source_port: port(self.source_port)?,
            dest_port: port(self.destination_port)?,
            packet_count: u64::try_from(self.packet_count)
                .map_err(|_| AppError::ValidationError("Packet count must be non-negative".to_string()))?,
            protocol: self.protocol.clone(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnomalyPrediction {
    pub anomaly_score: f64,
    pub risk_level: String,
    pub suspicious_activity_description: String,
    pub flagged_sections: Vec<String>,
}

impl From<AnalysisResult> for AnomalyPrediction {
    fn from(result: AnalysisResult) -> Self {
        Self {
            anomaly_score: result.score,
            risk_level: result.risk_tier.unwrap_or(RiskTier::Low).to_string(),
            suspicious_activity_description: result.explanation,
            flagged_sections: result.flags.into_iter().collect(),
        }
    }
}

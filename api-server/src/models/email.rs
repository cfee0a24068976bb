//! Email submission model

use cyberguard_core::{AnalysisResult, EmailMessage};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EmailInput {
    #[validate(contains(pattern = "@", message = "Invalid email format"))]
    pub sender_email: String,
    #[validate(contains(pattern = "@", message = "Invalid email format"))]
    pub recipient_email: String,
    pub subject: String,
    pub body: String,
    #[serde(default)]
    pub urls: Vec<String>,
}

impl EmailInput {
    pub fn to_message(&self) -> EmailMessage {
        EmailMessage {
            sender: self.sender_email.clone(),
            subject: self.subject.clone(),
            body: self.body.clone(),
            urls: self.urls.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailPrediction {
    pub phishing_probability: f64,
    pub flagged_sections: Vec<String>,
    pub explanation: String,
}

impl From<AnalysisResult> for EmailPrediction {
    fn from(result: AnalysisResult) -> Self {
        Self {
            phishing_probability: result.score,
            flagged_sections: result.flags.into_iter().collect(),
            explanation: result.explanation,
        }
    }
}

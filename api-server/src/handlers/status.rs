//! Model status handler

use axum::{extract::State, Json};
use cyberguard_core::ModelStatus;
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct EngineStatus {
    pub core_version: &'static str,
    pub email_model: ModelStatus,
    pub network_model: ModelStatus,
}

/// Does not trigger model loading
pub async fn models(State(state): State<AppState>) -> Json<EngineStatus> {
    Json(EngineStatus {
        core_version: cyberguard_core::constants::APP_VERSION,
        email_model: state.phishing.model_status(),
        network_model: state.anomaly.model_status(),
    })
}

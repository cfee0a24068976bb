//! Network anomaly handlers

use axum::{extract::State, Json};
use validator::Validate;

use crate::{AppState, AppResult};
use crate::models::{AnomalyPrediction, DetectionKind, DetectionRecord, NetworkLogInput};
use crate::retry::{run_blocking, MAX_ATTEMPTS};

/// Score a network flow and store the verdict
pub async fn submit(
    State(state): State<AppState>,
    Json(req): Json<NetworkLogInput>,
) -> AppResult<Json<AnomalyPrediction>> {
    req.validate()?;
    let flow = req.to_flow()?;

    let detector = state.anomaly.clone();
    let result = run_blocking(MAX_ATTEMPTS, move || detector.analyze(&flow)).await?;

    let prediction = AnomalyPrediction::from(result);
    let record = DetectionRecord::create(&state.pool, DetectionKind::Network, &req, &prediction).await?;

    tracing::info!(
        id = record.id,
        score = prediction.anomaly_score,
        risk = %prediction.risk_level,
        "Network log analyzed"
    );

    Ok(Json(prediction))
}

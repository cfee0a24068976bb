//! Email phishing handlers

use axum::{extract::State, Json};
use validator::Validate;

use crate::{AppState, AppResult};
use crate::models::{DetectionKind, DetectionRecord, EmailInput, EmailPrediction};
use crate::retry::{run_blocking, MAX_ATTEMPTS};

/// Score an email and store the verdict
pub async fn submit(
    State(state): State<AppState>,
    Json(req): Json<EmailInput>,
) -> AppResult<Json<EmailPrediction>> {
    req.validate()?;

    let detector = state.phishing.clone();
    let message = req.to_message();
    let result = run_blocking(MAX_ATTEMPTS, move || detector.analyze(&message)).await?;

    let prediction = EmailPrediction::from(result);
    let record = DetectionRecord::create(&state.pool, DetectionKind::Email, &req, &prediction).await?;

    tracing::info!(
        id = record.id,
        score = prediction.phishing_probability,
        flags = prediction.flagged_sections.len(),
        "Email analyzed"
    );

    Ok(Json(prediction))
}

//! Audit log handlers

use axum::{extract::{Query, State}, Json};
use serde::Deserialize;

use crate::{AppState, AppResult};
use crate::models::DetectionRecord;

#[derive(Debug, Deserialize, Default)]
pub struct ResultsFilter {
    pub limit: Option<i64>,
}

/// Most recent verdicts, newest first
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<ResultsFilter>,
) -> AppResult<Json<Vec<DetectionRecord>>> {
    let limit = state.config.effective_limit(filter.limit);
    let records = DetectionRecord::list_recent(&state.pool, limit).await?;
    Ok(Json(records))
}

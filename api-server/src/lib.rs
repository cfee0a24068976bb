//! CyberGuard API Server
//!
//! HTTP surface for the CyberGuard scoring engine.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     CYBERGUARD API                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌──────────────┐  ┌─────────────────────┐  │
//! │  │  API      │  │  Validation  │  │  Scoring Engine     │  │
//! │  │  Gateway  │─▶│  + Retry     │─▶│  (cyberguard-core)  │  │
//! │  │  (Axum)   │  │              │  │                     │  │
//! │  └───────────┘  └──────┬───────┘  └─────────────────────┘  │
//! │                        ▼                                    │
//! │                 ┌─────────────┐                             │
//! │                 │   SQLite    │                             │
//! │                 └─────────────┘                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod retry;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use cyberguard_core::{AnomalyDetector, ConfigError, ModelConfig, PhishingDetector, RuleSet};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};

pub use error::{AppError, AppResult};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pool: sqlx::SqlitePool,
    pub config: config::Config,
    /// One detector per domain for the whole process
    pub phishing: Arc<PhishingDetector>,
    pub anomaly: Arc<AnomalyDetector>,
}

impl AppState {
    pub fn new(
        pool: sqlx::SqlitePool,
        config: config::Config,
        rules: RuleSet,
        model_config: &ModelConfig,
    ) -> Result<Self, ConfigError> {
        let phishing = PhishingDetector::new(rules.phishing, model_config)?;
        let anomaly = AnomalyDetector::new(rules.anomaly, model_config);

        Ok(Self {
            pool,
            config,
            phishing: Arc::new(phishing),
            anomaly: Arc::new(anomaly),
        })
    }
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/model-status", get(handlers::status::models))
        .route("/submit-email", post(handlers::email::submit))
        .route("/submit-network-log", post(handlers::network::submit))
        .route("/get-results", get(handlers::results::list))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}

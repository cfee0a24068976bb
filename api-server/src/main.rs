//! CyberGuard API Server - entry point

use std::net::SocketAddr;
use std::path::Path;

use anyhow::Context;
use cyberguard_api::{config::Config, create_router, db, AppState};
use cyberguard_core::{ModelConfig, RuleSet};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "cyberguard_api=debug,cyberguard_core=info,tower_http=debug".into());
    if config.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("CyberGuard API starting ({})...", config.environment);
    tracing::info!("Database: {}", config.database_url);

    let rules = match &config.rules_path {
        Some(path) => {
            tracing::info!("Loading scoring rules from {}", path);
            RuleSet::from_json_file(Path::new(path))
                .with_context(|| format!("failed to load rules from {}", path))?
        }
        None => RuleSet::default(),
    };

    let model_config = ModelConfig::from_env();
    if model_config.enabled {
        tracing::info!("Model directory: {}", model_config.model_dir.display());
    } else {
        tracing::info!("Statistical models disabled, heuristics only");
    }

    // Initialize database pool
    let pool = db::create_pool(&config.database_url)
        .await
        .context("failed to create database pool")?;

    // Run migrations
    tracing::info!("Running database migrations...");
    db::run_migrations(&pool)
        .await
        .context("failed to run migrations")?;

    // Build application state
    let state = AppState::new(pool, config.clone(), rules, &model_config)
        .context("invalid scoring rules")?;

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

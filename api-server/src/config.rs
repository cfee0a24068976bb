//! Configuration module

use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Database connection URL
    pub database_url: String,

    /// Server port
    pub port: u16,

    /// Optional JSON rules file overriding the built-in scoring rules
    pub rules_path: Option<String>,

    /// Default number of rows returned by /get-results
    pub results_default_limit: i64,

    /// Emit JSON logs instead of human-readable ones
    pub log_json: bool,

    /// Environment (development, production)
    pub environment: String,
}

/// Hard cap for /get-results
pub const RESULTS_MAX_LIMIT: i64 = 500;

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://cyberguard.db?mode=rwc".to_string(),
            port: 8000,
            rules_path: None,
            results_default_limit: 20,
            log_json: false,
            environment: "development".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or(defaults.database_url),

            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),

            rules_path: env::var("RULES_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty()),

            results_default_limit: env::var("RESULTS_DEFAULT_LIMIT")
                .ok()
                .and_then(|l| l.parse().ok())
                .unwrap_or(defaults.results_default_limit),

            log_json: env::var("LOG_FORMAT")
                .map(|f| f.eq_ignore_ascii_case("json"))
                .unwrap_or(false),

            environment: env::var("ENVIRONMENT")
                .unwrap_or(defaults.environment),
        }
    }

    /// Requested limit -> effective limit in [0, RESULTS_MAX_LIMIT]
    pub fn effective_limit(&self, requested: Option<i64>) -> i64 {
        requested
            .unwrap_or(self.results_default_limit)
            .clamp(0, RESULTS_MAX_LIMIT)
    }
}

//! Detection result model (persisted verdicts)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::{FromRow, SqlitePool};

/// Which detector produced a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionKind {
    Email,
    Network,
}

impl DetectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DetectionKind::Email => "email",
            DetectionKind::Network => "network",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DetectionRecord {
    pub id: i64,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: String,
    pub timestamp: DateTime<Utc>,
    pub input_data: Json<serde_json::Value>,
    pub prediction: Json<serde_json::Value>,
}

impl DetectionRecord {
    pub async fn create<I, P>(
        pool: &SqlitePool,
        kind: DetectionKind,
        input: &I,
        prediction: &P,
    ) -> Result<Self, sqlx::Error>
    where
        I: Serialize + Sync,
        P: Serialize + Sync,
    {
        sqlx::query_as::<_, DetectionRecord>(
            r#"
            INSERT INTO detection_results (type, timestamp, input_data, prediction)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING *
            "#
        )
        .bind(kind.as_str())
        .bind(Utc::now())
        .bind(Json(input))
        .bind(Json(prediction))
        .fetch_one(pool)
        .await
    }

    /// Newest first
    pub async fn list_recent(pool: &SqlitePool, limit: i64) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, DetectionRecord>(
            r#"
            SELECT * FROM detection_results
            ORDER BY timestamp DESC, id DESC
            LIMIT ?1
            "#
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM detection_results")
            .fetch_one(pool)
            .await
    }
}

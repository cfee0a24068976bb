//! Bounded retry around blocking scoring work
//!
//! Scoring runs on the blocking pool because the first call may load a
//! model. A panicked or cancelled attempt is retried; after the last
//! attempt the failure is surfaced to the caller.

use std::sync::Arc;

/// Total attempts per request
pub const MAX_ATTEMPTS: usize = 2;

#[derive(Debug, thiserror::Error)]
pub enum RetryError {
    #[error("all {attempts} attempts failed, last error: {last}")]
    Exhausted { attempts: usize, last: String },
}

/// Run `job` on the blocking pool, up to `attempts` times
pub async fn run_blocking<F, T>(attempts: usize, job: F) -> Result<T, RetryError>
where
    F: Fn() -> T + Send + Sync + 'static,
    T: Send + 'static,
{
    let job = Arc::new(job);
    let attempts = attempts.max(1);
    let mut last = String::new();

    for attempt in 1..=attempts {
        let job = Arc::clone(&job);
        match tokio::task::spawn_blocking(move || job()).await {
            Ok(value) => return Ok(value),
            Err(e) => {
                tracing::warn!(attempt, max_attempts = attempts, "Analysis attempt failed: {}", e);
                last = e.to_string();
            }
        }
    }

    Err(RetryError::Exhausted { attempts, last })
}

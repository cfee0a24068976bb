//! Model Handle - lazy, load-once model holder
//!
//! The loader runs at most once per handle, on first use. Concurrent first
//! callers block until that single attempt finishes and then all observe the
//! same outcome. A failed attempt leaves the handle `Unavailable` for good,
//! including one where the loader panics.

use std::panic::{self, AssertUnwindSafe};

use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use super::{ModelError, ModelState};

type Loader<M> = Box<dyn Fn() -> Result<M, ModelError> + Send + Sync>;

/// Outcome of the single load attempt
struct Loaded<M> {
    model: Option<M>,
    at: DateTime<Utc>,
    detail: Option<String>,
}

/// Status snapshot for the UI / status endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelStatus {
    pub name: String,
    pub state: ModelState,
    pub attempted_at: Option<DateTime<Utc>>,
    /// Why the model is unavailable, if it is
    pub detail: Option<String>,
}

pub struct ModelHandle<M> {
    name: &'static str,
    cell: OnceCell<Loaded<M>>,
    loader: Loader<M>,
}

impl<M> ModelHandle<M> {
    /// Handle that will call `loader` on first use
    pub fn new<F>(name: &'static str, loader: F) -> Self
    where
        F: Fn() -> Result<M, ModelError> + Send + Sync + 'static,
    {
        Self {
            name,
            cell: OnceCell::new(),
            loader: Box::new(loader),
        }
    }

    /// Handle whose model is never available
    pub fn absent(name: &'static str) -> Self {
        Self::new(name, || Err(ModelError::Disabled))
    }

    /// Handle that starts out with a ready model
    pub fn ready(name: &'static str, model: M) -> Self {
        let loaded = Loaded {
            model: Some(model),
            at: Utc::now(),
            detail: None,
        };
        Self {
            name,
            cell: OnceCell::with_value(loaded),
            loader: Box::new(|| Err(ModelError::Load("already initialized".to_string()))),
        }
    }

    /// Model, initializing on first call. `None` if unavailable.
    pub fn get(&self) -> Option<&M> {
        self.cell.get_or_init(|| self.load()).model.as_ref()
    }

    fn load(&self) -> Loaded<M> {
        let outcome = match panic::catch_unwind(AssertUnwindSafe(|| (self.loader)())) {
            Ok(result) => result,
            Err(_) => {
                log::error!("{} model loader panicked, using heuristics only", self.name);
                return Loaded {
                    model: None,
                    at: Utc::now(),
                    detail: Some("loader panicked".to_string()),
                };
            }
        };

        match outcome {
            Ok(model) => {
                log::info!("{} model loaded", self.name);
                Loaded {
                    model: Some(model),
                    at: Utc::now(),
                    detail: None,
                }
            }
            Err(e) => {
                log::warn!("{} model unavailable ({}), using heuristics only", self.name, e);
                Loaded {
                    model: None,
                    at: Utc::now(),
                    detail: Some(e.to_string()),
                }
            }
        }
    }

    /// Current state without triggering initialization
    pub fn state(&self) -> ModelState {
        match self.cell.get() {
            None => ModelState::NotStarted,
            Some(l) if l.model.is_some() => ModelState::Ready,
            Some(_) => ModelState::Unavailable,
        }
    }

    pub fn status(&self) -> ModelStatus {
        let loaded = self.cell.get();
        ModelStatus {
            name: self.name.to_string(),
            state: self.state(),
            attempted_at: loaded.map(|l| l.at),
            detail: loaded.and_then(|l| l.detail.clone()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<M> std::fmt::Debug for ModelHandle<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelHandle")
            .field("name", &self.name)
            .field("state", &self.state())
            .finish()
    }
}

//! Logic Module - Scoring Engines
//!
//! ## Structure
//! - `signals/` - Heuristic signal extraction (email, network)
//! - `model/` - Optional statistical models (sentiment, isolation forest)
//! - `threat/` - Shared types, rules and aggregation
//! - `explain/` - Score -> explanation / risk tier
//! - `detector/` - Per-domain facades
//! - `config` - Model locations and rule sets

pub mod config;
pub mod detector;
pub mod explain;
pub mod model;
pub mod signals;
pub mod threat;

//! Signal Extractors
//!
//! Pure functions that inspect one aspect of the input and emit zero or
//! more labeled score deltas.
//!
//! ## Structure
//! - `email`: URL, sender, urgency and sentiment signals
//! - `network`: protocol encoding, feature vector, fallback heuristics

pub mod email;
pub mod network;

pub use email::UrgencyMatcher;

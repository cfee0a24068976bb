//! Explain Module - score -> explanation / risk tier

pub mod engine;

pub use engine::{explain_email, explain_network};

//! HTTP handlers

pub mod health;
pub mod email;
pub mod network;
pub mod results;
pub mod status;

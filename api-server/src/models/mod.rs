//! Data models

pub mod detection;
pub mod email;
pub mod network;

pub use detection::*;
pub use email::*;
pub use network::*;

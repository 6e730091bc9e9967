//! HTTP handlers for AgroSage

pub mod health;
pub mod recommendation;

pub use health::*;
pub use recommendation::*;

//! Shared types and pure pipeline stages for AgroSage
//!
//! This crate contains the farm input model, the recommendation model and the
//! prompt/extract/validate stages. It performs no I/O so it can be used by the
//! backend and by the browser client (via WASM).

pub mod extract;
pub mod models;
pub mod prompt;
pub mod types;
pub mod validation;

pub use extract::*;
pub use models::*;
pub use prompt::*;
pub use types::*;
pub use validation::*;

//! Domain models for AgroSage

mod board;
mod farm_input;
mod recommendation;

pub use board::*;
pub use farm_input::*;
pub use recommendation::*;

//! Business logic services for AgroSage

pub mod recommendation;

pub use recommendation::{RecommendationService, RecommendationSettings};

//! AgroSage - Backend library
//!
//! Collects farm field conditions, asks a remote language model for advice
//! and returns a validated, structured recommendation.

use std::sync::Arc;

use axum::{routing::get, Router};
use shared::RecommendationBoard;
use tokio::sync::RwLock;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;

use services::RecommendationService;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub recommendations: RecommendationService,
    /// Recommendations produced in this session
    pub board: Arc<RwLock<RecommendationBoard>>,
}

impl AppState {
    pub fn new(recommendations: RecommendationService) -> Self {
        Self {
            recommendations,
            board: Arc::new(RwLock::new(RecommendationBoard::new())),
        }
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "AgroSage Farm Advisory API v1.0"
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

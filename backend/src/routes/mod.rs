//! Route definitions for AgroSage

use axum::{routing::get, Router};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/recommendations", recommendation_routes())
}

/// Recommendation routes
fn recommendation_routes() -> Router<AppState> {
    Router::new().route(
        "/",
        get(handlers::list_recommendations)
            .post(handlers::create_recommendation)
            .delete(handlers::clear_recommendations),
    )
}

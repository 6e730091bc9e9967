//! AgroSage - Backend Server
//!
//! Serves AI-powered field recommendations to the AgroSage web client.

use std::{net::SocketAddr, sync::Arc, time::Duration};

use agrosage_backend::{
    create_app,
    external::GeminiClient,
    services::{RecommendationService, RecommendationSettings},
    AppState, Config,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agrosage_server=debug,agrosage_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting AgroSage Server");
    tracing::info!("Environment: {}", config.environment);

    let api_key = config.gemini.credential().map(str::to_string);
    if api_key.is_none() {
        tracing::warn!(
            "API_KEY environment variable is not set. Gemini API calls will fail. \
             Please ensure the API_KEY is configured in your environment."
        );
    }

    let generator = GeminiClient::with_base_url(
        config.gemini.base_url.clone(),
        Duration::from_secs(config.gemini.timeout_secs),
    )?;
    let recommendations = RecommendationService::new(
        Arc::new(generator),
        RecommendationSettings::new(api_key, config.recommendation.temperature_unit),
    );

    // Create application state
    let state = AppState::new(recommendations);

    // Build application
    let app = create_app(state);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

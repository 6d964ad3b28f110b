//! CityPulse HTTP Server
//!
//! Axum-based server exposing the conversational city guide and the
//! route planner as a REST API.

mod handlers;
mod state;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agent_core::{AgentConfig, GenerationOptions, ModelClient};
use agent_runtime::OllamaClient;
use city_guide::{
    CityGuide, GeoConfig, GeoDataClient, HttpGeoClient, MockGeoClient, RoutePlanner,
    CITY_GUIDE_PROMPT,
};

use crate::handlers::{citypulse_handler, health_check, list_models, route_handler};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    // Initialize model client
    let client: Arc<dyn ModelClient> = Arc::new(OllamaClient::from_env());

    // Verify Ollama connection
    match client.health_check().await {
        Ok(true) => {
            tracing::info!("✓ Connected to Ollama");
            if let Ok(models) = client.list_models().await {
                for model in models {
                    tracing::info!("  Model: {}", model.id);
                }
            }
        }
        Ok(false) | Err(_) => {
            tracing::warn!("⚠ Ollama not available - guide will fail");
            tracing::warn!("  Make sure Ollama is running: ollama serve");
        }
    }

    // Initialize the geo data client; fall back to fixtures when API
    // keys are missing so the server stays usable in development
    let geo: Arc<dyn GeoDataClient> = match GeoConfig::from_env() {
        Ok(config) => {
            tracing::info!("✓ Live geo data configured (Google Maps + OpenWeather)");
            Arc::new(HttpGeoClient::new(config))
        }
        Err(e) => {
            tracing::warn!("⚠ {}", e);
            tracing::warn!("  Falling back to mock geo data");
            Arc::new(MockGeoClient::new())
        }
    };

    let generation = GenerationOptions {
        model: std::env::var("OLLAMA_MODEL").unwrap_or_else(|_| "llama3.1".into()),
        ..Default::default()
    };
    tracing::info!(model = %generation.model, "using model");

    let guide = Arc::new(CityGuide::with_config(
        client.clone(),
        geo.clone(),
        AgentConfig {
            system_prompt: CITY_GUIDE_PROMPT.into(),
            generation,
            ..Default::default()
        },
    ));
    let planner = Arc::new(RoutePlanner::new(geo));

    let state = AppState {
        client,
        guide,
        planner,
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        .route("/health", get(health_check))
        .route("/api/models", get(list_models))
        .route("/api/citypulse", post(citypulse_handler))
        .route("/api/route", post(route_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 CityPulse server running on http://{}", addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health        - Health check");
    tracing::info!("  GET  /api/models    - List available models");
    tracing::info!("  POST /api/citypulse - Ask the city guide");
    tracing::info!("  POST /api/route     - Route analysis report");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}

//! HTTP Handlers

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use city_guide::{GeoPoint, GuideRequest};

use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub ollama_connected: bool,
}

/// Coordinate pair as it arrives on the wire, unvalidated
#[derive(Debug, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Deserialize)]
pub struct GuideApiRequest {
    pub prompt: String,
    #[serde(default)]
    pub origin: Option<Coordinates>,
    #[serde(default)]
    pub destination: Option<Coordinates>,
}

#[derive(Debug, Serialize)]
pub struct GuideApiResponse {
    pub response: String,
}

#[derive(Debug, Deserialize)]
pub struct RouteApiRequest {
    pub origin: Coordinates,
    pub destination: Coordinates,
}

#[derive(Debug, Serialize)]
pub struct RouteApiResponse {
    pub report: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(error: impl Into<String>, code: &str) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: error.into(),
            code: code.into(),
        }),
    )
}

fn validate(coords: &Coordinates) -> Result<GeoPoint, ApiError> {
    GeoPoint::new(coords.lat, coords.lng)
        .map_err(|e| bad_request(e.to_string(), "INVALID_COORDINATE"))
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let ollama_connected = state.client.health_check().await.unwrap_or(false);

    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        ollama_connected,
    })
}

/// List available models
pub async fn list_models(
    State(state): State<AppState>,
) -> Result<Json<Vec<agent_core::ModelInfo>>, ApiError> {
    let models = state.client.list_models().await.map_err(|e| {
        tracing::error!("Model listing failed: {}", e);
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse {
                error: e.user_message(),
                code: "MODELS_UNAVAILABLE".into(),
            }),
        )
    })?;

    Ok(Json(models))
}

/// Main city guide endpoint
pub async fn citypulse_handler(
    State(state): State<AppState>,
    Json(payload): Json<GuideApiRequest>,
) -> Result<Json<GuideApiResponse>, ApiError> {
    if payload.prompt.trim().is_empty() {
        return Err(bad_request("A prompt must be provided", "EMPTY_PROMPT"));
    }

    let origin = payload.origin.as_ref().map(validate).transpose()?;
    let destination = payload.destination.as_ref().map(validate).transpose()?;

    let request = GuideRequest {
        prompt: payload.prompt,
        origin,
        destination,
    };

    // Errors are already converted to user-facing text inside the guide
    let response = state.guide.answer(&request).await;

    Ok(Json(GuideApiResponse { response }))
}

/// Route analysis endpoint
pub async fn route_handler(
    State(state): State<AppState>,
    Json(payload): Json<RouteApiRequest>,
) -> Result<Json<RouteApiResponse>, ApiError> {
    let origin = validate(&payload.origin)?;
    let destination = validate(&payload.destination)?;

    let report = state.planner.analyze(origin, destination).await.map_err(|e| {
        tracing::error!("Route analysis failed: {}", e);
        (
            StatusCode::BAD_GATEWAY,
            Json(ErrorResponse {
                error: e.to_string(),
                code: "ROUTE_ANALYSIS_FAILED".into(),
            }),
        )
    })?;

    Ok(Json(RouteApiResponse { report }))
}

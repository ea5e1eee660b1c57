//! System endpoints: health check, metrics, and active profile.

use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;
use crate::concierge::ConciergeProfile;
use crate::error::ConciergeError;

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    status: String,
    timestamp: String,
    version: String,
    chat_available: bool,
    speech_available: bool,
}

/// `GET /health` — Service health status.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health, version, and whether the chat and speech backends are configured.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            chat_available: state.agent.is_available(),
            speech_available: state.speech.is_available(),
        }),
    )
}

/// `GET /metrics` — Prometheus request metrics.
#[utoipa::path(
    get,
    path = "/metrics",
    tag = "System",
    summary = "Prometheus metrics",
    description = "Request counts and latency histograms labelled by method, matched path and status.",
    responses(
        (status = 200, description = "Prometheus text exposition", body = String, content_type = "text/plain"),
    )
)]
pub async fn metrics_handler(State(state): State<AppState>) -> Response {
    match state.metrics.render() {
        Ok(body) => ([(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)], body).into_response(),
        Err(e) => ConciergeError::Internal(e.to_string()).into_response(),
    }
}

/// `GET /api/profile` — The active concierge persona.
#[utoipa::path(
    get,
    path = "/api/profile",
    tag = "System",
    summary = "Active concierge profile",
    description = "Returns display metadata, voice, and avatar assets of the configured concierge. The system prompt is not exposed.",
    responses(
        (status = 200, description = "Active profile", body = ConciergeProfile),
    )
)]
pub async fn profile_handler(State(state): State<AppState>) -> Json<ConciergeProfile> {
    Json(state.agent.profile().clone())
}

/// Profile route, mounted under `/api`.
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/profile", get(profile_handler))
}

/// System routes mounted at the root level (not under `/api`).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
}

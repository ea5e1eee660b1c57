//! REST API layer: route handlers, DTOs, OpenAPI document, and router
//! composition.
//!
//! Resource endpoints are mounted under `/api`; `/health` and `/metrics`
//! sit at the root. The browser client is served from a static directory
//! as the fallback.

pub mod docs;
pub mod dto;
pub mod handlers;
pub mod metrics;

use std::path::Path;
use std::sync::Arc;

use axum::{Router, middleware};
use tower_http::services::{ServeDir, ServeFile};

use crate::app_state::AppState;

/// Builds the complete API router with all REST endpoints, recording
/// request metrics into `state.metrics`.
pub fn build_router(state: &AppState) -> Router<AppState> {
    Router::new()
        .nest("/api", handlers::routes())
        .merge(handlers::system::routes())
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state.metrics),
            metrics::track_metrics,
        ))
}

/// Serves the browser client from `dir`. Unknown paths get `index.html`
/// so client-side routes resolve.
pub fn static_files(dir: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")))
}

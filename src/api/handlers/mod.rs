//! REST endpoint handlers organized by resource.

pub mod chat;
pub mod floor;
pub mod speech;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(floor::routes())
        .merge(chat::routes())
        .merge(speech::routes())
        .merge(system::api_routes())
}

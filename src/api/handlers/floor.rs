//! Floor endpoints: status snapshot, table lookup, and checkout.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{CheckoutFailure, CheckoutRequest, CheckoutResponse, parse_lenient};
use crate::app_state::AppState;
use crate::domain::{CheckoutResult, FloorStatus, Table, TableId};
use crate::error::{ConciergeError, ErrorResponse};

/// `GET /status` — Snapshot of every table and the waitlist.
#[utoipa::path(
    get,
    path = "/api/status",
    tag = "Floor",
    summary = "Floor status",
    description = "Returns all tables in inventory order and the waitlist in arrival order with current wait estimates.",
    responses(
        (status = 200, description = "Floor snapshot", body = FloorStatus),
    )
)]
pub async fn get_status(State(state): State<AppState>) -> Json<FloorStatus> {
    Json(state.floor.status().await)
}

/// `GET /tables/:id` — Look up a single table.
///
/// # Errors
///
/// Returns [`ConciergeError::TableNotFound`] if no table has this ID.
#[utoipa::path(
    get,
    path = "/api/tables/{id}",
    tag = "Floor",
    summary = "Get table",
    params(
        ("id" = String, Path, description = "Table ID, e.g. T4-2"),
    ),
    responses(
        (status = 200, description = "Table found", body = Table),
        (status = 404, description = "Table not found", body = ErrorResponse),
    )
)]
pub async fn get_table(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Table>, ConciergeError> {
    let table = state.floor.table(&TableId::new(id)).await?;
    Ok(Json(table))
}

/// `POST /checkout` — Free a table and seat the first waiting party that
/// fits.
///
/// Failures answer 400 with `{"success": false, "message": ...}` so the
/// dashboard can show the message as-is.
#[utoipa::path(
    post,
    path = "/api/checkout",
    tag = "Floor",
    summary = "Check out a table",
    description = "Frees the table. If a waiting party fits, it is seated immediately and an announcement is returned.",
    request_body = CheckoutRequest,
    responses(
        (status = 200, description = "Table checked out", body = CheckoutResponse),
        (status = 400, description = "Missing or unknown table", body = CheckoutFailure),
    )
)]
pub async fn checkout(State(state): State<AppState>, body: Bytes) -> Response {
    let req: CheckoutRequest = parse_lenient(&body);
    let Some(table_id) = req
        .table_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
    else {
        return (
            StatusCode::BAD_REQUEST,
            Json(CheckoutFailure::new("table_id required")),
        )
            .into_response();
    };

    let (result, _event) = state.floor.checkout(&TableId::new(table_id)).await;
    match result {
        CheckoutResult::Released(release) => {
            (StatusCode::OK, Json(CheckoutResponse::from(release))).into_response()
        }
        CheckoutResult::NotFound(_) => (
            StatusCode::BAD_REQUEST,
            Json(CheckoutFailure::new("Table not found.")),
        )
            .into_response(),
    }
}

/// Floor routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/status", get(get_status))
        .route("/tables/{id}", get(get_table))
        .route("/checkout", post(checkout))
}

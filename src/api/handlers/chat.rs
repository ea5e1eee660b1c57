//! Chat endpoint: one guest message in, one concierge reply out.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::{ChatEvent, ChatRequest, ChatResponse, parse_lenient};
use crate::app_state::AppState;
use crate::domain::FloorEvent;

/// Reply when the request carries no message.
pub const EMPTY_MESSAGE_REPLY: &str = "I didn't catch that, could you repeat?";

/// Reply when the model fails or is not configured.
pub const GLITCH_REPLY: &str = "I had a glitch, could you say that again?";

/// `POST /chat` — Send a guest message to the concierge.
///
/// Every outcome has the same body shape, so the voice UI can always speak
/// `response`. Model failures answer 500 with a friendly retry prompt.
#[utoipa::path(
    post,
    path = "/api/chat",
    tag = "Concierge",
    summary = "Chat with the concierge",
    description = "Runs one conversational turn. The concierge may check availability, seat the guest, or add them to the waitlist; the resulting floor event is attached.",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Concierge reply", body = ChatResponse),
        (status = 400, description = "No message supplied", body = ChatResponse),
        (status = 500, description = "Model failure", body = ChatResponse),
    )
)]
pub async fn chat(State(state): State<AppState>, body: Bytes) -> Response {
    let req: ChatRequest = parse_lenient(&body);
    let Some(message) = req.message.filter(|m| !m.trim().is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ChatResponse::text_only(EMPTY_MESSAGE_REPLY)),
        )
            .into_response();
    };

    match state.agent.respond(&message).await {
        Ok(reply) => {
            let event = match reply.event {
                Some(event) => Some(enrich(&state, event).await),
                None => None,
            };
            let body = ChatResponse {
                response: reply.text,
                interaction_complete: event.is_some(),
                event,
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => {
            tracing::warn!(code = e.error_code(), error = %e, "chat turn failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ChatResponse::text_only(GLITCH_REPLY)),
            )
                .into_response()
        }
    }
}

/// Attaches the live wait estimate to waitlist events.
async fn enrich(state: &AppState, event: FloorEvent) -> ChatEvent {
    let eta_minutes = match &event {
        FloorEvent::Waitlisted { entry_id, .. } => state.floor.eta_for(*entry_id).await,
        FloorEvent::TableAssigned { .. } => None,
    };
    ChatEvent { event, eta_minutes }
}

/// Chat routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/chat", post(chat))
}

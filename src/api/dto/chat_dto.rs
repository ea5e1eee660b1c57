//! Chat DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::FloorEvent;

/// Request body for `POST /api/chat`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ChatRequest {
    /// What the guest said.
    #[serde(default)]
    pub message: Option<String>,
}

/// Floor event attached to a chat reply.
#[derive(Debug, Serialize)]
pub struct ChatEvent {
    /// The event, flattened into this object.
    #[serde(flatten)]
    pub event: FloorEvent,
    /// Current wait estimate, for waitlist events still waiting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eta_minutes: Option<u32>,
}

/// Response body for `POST /api/chat`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ChatResponse {
    /// Concierge reply text.
    pub response: String,
    /// `true` once the guest was seated or waitlisted this turn.
    #[serde(rename = "interactionComplete")]
    pub interaction_complete: bool,
    /// Event from this turn, if any.
    #[schema(value_type = Option<Object>)]
    pub event: Option<ChatEvent>,
}

impl ChatResponse {
    /// A reply with no event, used for fallbacks and errors.
    #[must_use]
    pub fn text_only(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            interaction_complete: false,
            event: None,
        }
    }
}

//! OpenAPI document for the REST surface.

use utoipa::OpenApi;

use super::dto::{
    ChatRequest, ChatResponse, CheckoutFailure, CheckoutRequest, CheckoutResponse, TtsError,
    TtsRequest, TtsResponse,
};
use super::handlers::{chat, floor, speech, system};
use crate::concierge::ConciergeProfile;
use crate::domain::{
    EntryId, FloorStatus, PartySize, Table, TableId, TableStatus, WaitlistEntry, WaitlistRow,
};
use crate::error::{ErrorBody, ErrorResponse};

/// Generated OpenAPI document, served by Swagger UI when the
/// `swagger-ui` feature is enabled.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "cafe-concierge",
        description = "Table allocation, waitlist, and conversational concierge for a small café."
    ),
    paths(
        floor::get_status,
        floor::get_table,
        floor::checkout,
        chat::chat,
        speech::synthesize,
        system::health_handler,
        system::metrics_handler,
        system::profile_handler,
    ),
    components(schemas(
        ChatRequest,
        ChatResponse,
        CheckoutFailure,
        CheckoutRequest,
        CheckoutResponse,
        ConciergeProfile,
        EntryId,
        ErrorBody,
        ErrorResponse,
        FloorStatus,
        PartySize,
        Table,
        TableId,
        TableStatus,
        TtsError,
        TtsRequest,
        TtsResponse,
        WaitlistEntry,
        WaitlistRow,
    )),
    tags(
        (name = "Floor", description = "Tables, waitlist, and checkout"),
        (name = "Concierge", description = "Chat and speech"),
        (name = "System", description = "Health and configuration"),
    )
)]
pub struct ApiDoc;

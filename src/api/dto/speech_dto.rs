//! Text-to-speech DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for `POST /api/tts`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct TtsRequest {
    /// Text to speak.
    #[serde(default)]
    pub text: Option<String>,
    /// Voice override; defaults to the profile voice.
    #[serde(default)]
    pub voice: Option<String>,
}

/// Response body for `POST /api/tts`.
#[derive(Debug, Serialize, ToSchema)]
pub struct TtsResponse {
    /// Base64-encoded MP3.
    pub audio: String,
}

/// Error body for `POST /api/tts`.
#[derive(Debug, Serialize, ToSchema)]
pub struct TtsError {
    /// What went wrong.
    pub error: String,
}

impl TtsError {
    /// Creates an error body.
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

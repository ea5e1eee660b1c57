//! Text-to-speech endpoint.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::{TtsError, TtsRequest, TtsResponse, parse_lenient};
use crate::app_state::AppState;
use crate::error::ConciergeError;
use crate::speech::SynthesizedAudio;

/// `POST /tts` — Synthesize speech for a concierge reply.
#[utoipa::path(
    post,
    path = "/api/tts",
    tag = "Concierge",
    summary = "Synthesize speech",
    description = "Returns base64-encoded MP3 audio. The voice defaults to the active profile's voice.",
    request_body = TtsRequest,
    responses(
        (status = 200, description = "Audio synthesized", body = TtsResponse),
        (status = 400, description = "No text supplied", body = TtsError),
        (status = 500, description = "Speech backend missing or failed", body = TtsError),
    )
)]
pub async fn synthesize(State(state): State<AppState>, body: Bytes) -> Response {
    let req: TtsRequest = parse_lenient(&body);
    match speak(&state, req).await {
        Ok(audio) => (
            StatusCode::OK,
            Json(TtsResponse {
                audio: audio.audio_base64,
            }),
        )
            .into_response(),
        Err(ConciergeError::InvalidRequest(message)) => {
            tts_error(StatusCode::BAD_REQUEST, &message)
        }
        Err(e @ ConciergeError::SpeechUnavailable) => {
            tracing::warn!(code = e.error_code(), error = %e, "TTS requested without backend");
            tts_error(StatusCode::INTERNAL_SERVER_ERROR, "TTS unavailable")
        }
        Err(e) => {
            tracing::error!(code = e.error_code(), error = %e, "TTS failed");
            tts_error(StatusCode::INTERNAL_SERVER_ERROR, "TTS failed")
        }
    }
}

/// Validates the request and runs the speech backend.
async fn speak(state: &AppState, req: TtsRequest) -> Result<SynthesizedAudio, ConciergeError> {
    if !state.speech.is_available() {
        return Err(ConciergeError::SpeechUnavailable);
    }
    let text = req
        .text
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ConciergeError::InvalidRequest("No text supplied".to_string()))?;
    let voice = req
        .voice
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| state.agent.profile().tts_voice.clone());

    let audio = state
        .speech
        .synthesize(&text, Some(&voice))
        .await
        .map_err(|e| ConciergeError::Speech(e.to_string()))?;
    tracing::debug!(%voice, audio_bytes = audio.byte_len, "tts response ready");
    Ok(audio)
}

fn tts_error(status: StatusCode, message: &str) -> Response {
    (status, Json(TtsError::new(message))).into_response()
}

/// Speech routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/tts", post(synthesize))
}

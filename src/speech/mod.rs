//! Text-to-speech for the on-screen concierge.
//!
//! [`SpeechSynthesizer`] is the seam the HTTP layer talks to. The engine
//! never calls it; speech only consumes text the concierge produced.

pub mod google;

use std::fmt::Debug;

use async_trait::async_trait;

pub use google::GoogleTts;

/// Synthesized audio, base64-encoded for JSON transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedAudio {
    /// Base64 MP3 bytes.
    pub audio_base64: String,
    /// Decoded size in bytes.
    pub byte_len: usize,
}

/// A speech backend.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync + Debug {
    /// Returns `true` if the backend is configured.
    fn is_available(&self) -> bool;

    /// Voice used when the caller does not pick one.
    fn default_voice(&self) -> &str;

    /// Synthesizes `text` with `voice`, or the default voice.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend is unconfigured, unreachable, or
    /// returns no audio.
    async fn synthesize(&self, text: &str, voice: Option<&str>) -> anyhow::Result<SynthesizedAudio>;
}

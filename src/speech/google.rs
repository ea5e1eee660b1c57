//! Google Cloud Text-to-Speech REST backend.

use std::time::Instant;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use super::{SpeechSynthesizer, SynthesizedAudio};

/// Public Text-to-Speech endpoint.
pub const TTS_API_URL: &str = "https://texttospeech.googleapis.com/v1";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeRequest<'a> {
    input: SynthesisInput<'a>,
    voice: VoiceSelection<'a>,
    audio_config: AudioConfig,
}

#[derive(Debug, Serialize)]
struct SynthesisInput<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceSelection<'a> {
    language_code: String,
    name: &'a str,
    ssml_gender: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AudioConfig {
    audio_encoding: &'static str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SynthesizeResponse {
    #[serde(default)]
    audio_content: String,
}

/// Derives the BCP-47 language code from a voice name such as
/// `en-IN-Standard-E`. Falls back to `en-US`.
#[must_use]
pub fn language_code(voice: &str) -> String {
    let mut parts = voice.split('-');
    match (parts.next(), parts.next()) {
        (Some(lang), Some(region)) if !lang.is_empty() && !region.is_empty() => {
            format!("{lang}-{region}")
        }
        _ => "en-US".to_string(),
    }
}

/// Google Cloud Text-to-Speech client authenticated with an API key.
#[derive(Debug, Clone)]
pub struct GoogleTts {
    api_key: Option<String>,
    http: reqwest::Client,
    base_url: String,
    default_voice: String,
}

impl GoogleTts {
    /// Creates a client. Without an API key the backend reports itself
    /// unavailable.
    #[must_use]
    pub fn new(api_key: Option<String>, default_voice: &str) -> Self {
        Self {
            api_key,
            http: reqwest::Client::new(),
            base_url: TTS_API_URL.to_string(),
            default_voice: default_voice.to_string(),
        }
    }

    /// Overrides the API base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Uses a preconfigured HTTP client.
    #[must_use]
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    fn headers(&self, api_key: &str) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert("x-goog-api-key", HeaderValue::from_str(api_key)?);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleTts {
    fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    fn default_voice(&self) -> &str {
        &self.default_voice
    }

    async fn synthesize(&self, text: &str, voice: Option<&str>) -> Result<SynthesizedAudio> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("no Text-to-Speech API key configured"))?;
        let voice = voice.unwrap_or(&self.default_voice);
        let language_code = language_code(voice);

        let request = SynthesizeRequest {
            input: SynthesisInput { text },
            voice: VoiceSelection {
                language_code: language_code.clone(),
                name: voice,
                ssml_gender: "FEMALE",
            },
            audio_config: AudioConfig {
                audio_encoding: "MP3",
            },
        };

        let start = Instant::now();
        let url = format!("{}/text:synthesize", self.base_url);
        let response = self
            .http
            .post(&url)
            .headers(self.headers(api_key)?)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            error!(%status, voice, "TTS synth failed");
            return Err(anyhow!("Text-to-Speech API error ({status}): {error_text}"));
        }

        let body: SynthesizeResponse = response.json().await?;
        let bytes = STANDARD.decode(body.audio_content.as_bytes())?;
        if bytes.is_empty() {
            return Err(anyhow!("Text-to-Speech returned no audio"));
        }
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        info!(
            voice,
            lang = %language_code,
            chars = text.chars().count(),
            audio_bytes = bytes.len(),
            duration_ms = elapsed_ms,
            "speech synthesized"
        );
        debug!(
            audio_base64_first64 = %body.audio_content.chars().take(64).collect::<String>(),
            "speech payload"
        );

        Ok(SynthesizedAudio {
            audio_base64: body.audio_content,
            byte_len: bytes.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_code_uses_first_two_parts() {
        assert_eq!(language_code("en-IN-Standard-E"), "en-IN");
        assert_eq!(language_code("en-GB-Chirp3-HD-Erinome"), "en-GB");
    }

    #[test]
    fn language_code_falls_back() {
        assert_eq!(language_code("narrator"), "en-US");
        assert_eq!(language_code(""), "en-US");
    }

    #[test]
    fn without_key_is_unavailable() {
        let tts = GoogleTts::new(None, "en-IN-Standard-E");
        assert!(!tts.is_available());
        assert_eq!(tts.default_voice(), "en-IN-Standard-E");
    }

    #[tokio::test]
    async fn synthesize_without_key_fails_fast() {
        let tts = GoogleTts::new(None, "en-IN-Standard-E");
        assert!(tts.synthesize("hello", None).await.is_err());
    }

    #[test]
    fn request_shape() {
        let request = SynthesizeRequest {
            input: SynthesisInput { text: "hi" },
            voice: VoiceSelection {
                language_code: language_code("en-US-Chirp3-HD-Sulafat"),
                name: "en-US-Chirp3-HD-Sulafat",
                ssml_gender: "FEMALE",
            },
            audio_config: AudioConfig {
                audio_encoding: "MP3",
            },
        };
        let json = serde_json::to_value(&request).unwrap_or_default();
        assert_eq!(json["voice"]["languageCode"], "en-US");
        assert_eq!(json["audioConfig"]["audioEncoding"], "MP3");
        assert_eq!(json["input"]["text"], "hi");
    }
}

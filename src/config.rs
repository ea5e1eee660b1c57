//! Service configuration loaded from environment variables.
//!
//! All settings come from environment variables (or a `.env` file via
//! `dotenvy`). The table inventory is not configurable; it is the fixed
//! seed in [`crate::domain::Floor::default_inventory`].

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::concierge::gemini::GEMINI_API_URL;
use crate::concierge::profile::DEFAULT_PROFILE_ID;
use crate::domain::floor::DEFAULT_TURNOVER_MINUTES;
use crate::speech::google::TTS_API_URL;

/// Top-level service configuration.
///
/// Loaded once at startup via [`ConciergeConfig::from_env`].
#[derive(Clone)]
pub struct ConciergeConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:5001`).
    pub listen_addr: SocketAddr,

    /// Concierge profile ID (`CONCIERGE_ID`).
    pub concierge_id: String,

    /// Google API key for Gemini and Text-to-Speech. Chat and speech
    /// report themselves unavailable without it.
    pub google_api_key: Option<String>,

    /// Average table turnover used for waitlist ETAs.
    pub turnover_minutes: u32,

    /// Capacity of the board update broadcast channel.
    pub event_bus_capacity: usize,

    /// Timeout for outbound model and speech requests.
    pub upstream_timeout_secs: u64,

    /// Gemini API base URL.
    pub gemini_base_url: String,

    /// Text-to-Speech API base URL.
    pub tts_base_url: String,

    /// Directory holding the browser client (`index.html`, `js/`).
    pub static_dir: PathBuf,
}

impl std::fmt::Debug for ConciergeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConciergeConfig")
            .field("listen_addr", &self.listen_addr)
            .field("concierge_id", &self.concierge_id)
            .field(
                "google_api_key",
                &self.google_api_key.as_ref().map(|_| "<redacted>"),
            )
            .field("turnover_minutes", &self.turnover_minutes)
            .field("event_bus_capacity", &self.event_bus_capacity)
            .field("upstream_timeout_secs", &self.upstream_timeout_secs)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("tts_base_url", &self.tts_base_url)
            .field("static_dir", &self.static_dir)
            .finish()
    }
}

impl ConciergeConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`].
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:5001".to_string())
            .parse()?;

        let concierge_id =
            std::env::var("CONCIERGE_ID").unwrap_or_else(|_| DEFAULT_PROFILE_ID.to_string());

        let google_api_key = std::env::var("GOOGLE_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());

        Ok(Self {
            listen_addr,
            concierge_id,
            google_api_key,
            turnover_minutes: parse_env("TABLE_TURNOVER_MINUTES", DEFAULT_TURNOVER_MINUTES),
            event_bus_capacity: parse_env("EVENT_BUS_CAPACITY", 1024),
            upstream_timeout_secs: parse_env("UPSTREAM_TIMEOUT_SECS", 30),
            gemini_base_url: std::env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| GEMINI_API_URL.to_string()),
            tts_base_url: std::env::var("TTS_BASE_URL").unwrap_or_else(|_| TTS_API_URL.to_string()),
            static_dir: std::env::var("STATIC_DIR")
                .map_or_else(|_| PathBuf::from("static"), PathBuf::from),
        })
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_env_falls_back_on_missing_key() {
        assert_eq!(parse_env("CAFE_CONCIERGE_TEST_UNSET_KEY", 15_u32), 15);
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = ConciergeConfig {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 5001)),
            concierge_id: "maya".to_string(),
            google_api_key: Some("secret-key".to_string()),
            turnover_minutes: 15,
            event_bus_capacity: 8,
            upstream_timeout_secs: 5,
            gemini_base_url: GEMINI_API_URL.to_string(),
            tts_base_url: TTS_API_URL.to_string(),
            static_dir: PathBuf::from("static"),
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("secret-key"));
        assert!(rendered.contains("<redacted>"));
    }
}

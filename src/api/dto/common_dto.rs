//! Shared DTO helpers used across multiple endpoints.

use serde::de::DeserializeOwned;

/// Parses a JSON request body, treating a missing, empty, or malformed
/// body as an empty object.
///
/// Endpoints validate the resulting fields themselves and answer with
/// their own 400 bodies instead of Axum's extractor rejections.
#[must_use]
pub fn parse_lenient<T: DeserializeOwned + Default>(body: &[u8]) -> T {
    serde_json::from_slice(body).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Probe {
        #[serde(default)]
        value: Option<String>,
    }

    #[test]
    fn malformed_body_becomes_default() {
        assert_eq!(parse_lenient::<Probe>(b"not json"), Probe::default());
        assert_eq!(parse_lenient::<Probe>(b""), Probe::default());
    }

    #[test]
    fn valid_body_parses() {
        let probe: Probe = parse_lenient(br#"{"value":"x"}"#);
        assert_eq!(probe.value.as_deref(), Some("x"));
    }
}

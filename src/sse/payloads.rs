//! SSE payload deserialization structs
//!
//! Contains the structs used to deserialize JSON data payloads from the
//! assistant stream.

use serde::de::Error as _;
use serde::Deserialize;

/// Payload of a `chunk` event: `{"text": "..."}`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ChunkPayload {
    /// Text fragment; a missing or null field counts as empty
    #[serde(default)]
    pub text: Option<String>,
}

/// Diagnostic payload of an `error` event.
///
/// The backend sends `{"error": "..."}`; `message` is accepted as well.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorPayload {
    #[serde(default, alias = "message")]
    pub error: Option<String>,
}

/// Decode a chunk payload into its text fragment.
///
/// Only a JSON object is accepted, so `["text"]` does not slip through as a
/// sequence-encoded struct.
pub(crate) fn parse_chunk_text(data: &str) -> Result<String, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(data)?;
    if !value.is_object() {
        return Err(serde_json::Error::custom("chunk payload is not a JSON object"));
    }
    let payload = ChunkPayload::deserialize(value)?;
    Ok(payload.text.unwrap_or_default())
}

/// Best-effort extraction of an error message from a diagnostic payload.
pub(crate) fn parse_error_message(data: &str) -> Option<String> {
    serde_json::from_str::<ErrorPayload>(data)
        .ok()
        .and_then(|payload| payload.error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_text() {
        assert_eq!(parse_chunk_text(r#"{"text":"hi"}"#).unwrap(), "hi");
        assert_eq!(parse_chunk_text(r#"{"text":"a\nb"}"#).unwrap(), "a\nb");
    }

    #[test]
    fn test_chunk_missing_text_is_empty() {
        assert_eq!(parse_chunk_text("{}").unwrap(), "");
        assert_eq!(parse_chunk_text(r#"{"text":null}"#).unwrap(), "");
    }

    #[test]
    fn test_chunk_invalid_json() {
        assert!(parse_chunk_text("not json").is_err());
        assert!(parse_chunk_text(r#"{"text":"unterminated"#).is_err());
        assert!(parse_chunk_text(r#"{"text":42}"#).is_err());
    }

    #[test]
    fn test_chunk_must_be_object() {
        assert!(parse_chunk_text(r#"["hi"]"#).is_err());
        assert!(parse_chunk_text(r#""hi""#).is_err());
    }

    #[test]
    fn test_error_message() {
        assert_eq!(
            parse_error_message(r#"{"error":"quota exceeded"}"#),
            Some("quota exceeded".to_string())
        );
        assert_eq!(
            parse_error_message(r#"{"message":"boom"}"#),
            Some("boom".to_string())
        );
        assert_eq!(parse_error_message("{}"), None);
        assert_eq!(parse_error_message("plain text"), None);
    }
}

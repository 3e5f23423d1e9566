//! Downstream error types
//!
//! Every failure the adapter can report is one of these variants, so the
//! entry point can map it to the nearest external response.

use reqwest::StatusCode;
use thiserror::Error;

/// Longest backend error text carried into a gateway error message.
const MAX_MESSAGE_LEN: usize = 512;

/// Downstream call failure
#[derive(Error, Debug, Clone)]
pub enum DownstreamError {
    /// Backend answered with a non-2xx status.
    #[error("{service} service returned {status}: {message}")]
    Status {
        service: &'static str,
        status: StatusCode,
        message: String,
    },

    /// Request never produced a response (timeout, refused, reset).
    #[error("{service} service unreachable: {message}")]
    Transport {
        service: &'static str,
        message: String,
        timeout: bool,
    },

    /// Backend answered 2xx but the body did not match the expected shape.
    #[error("{service} service sent an undecodable body: {message}")]
    Decode {
        service: &'static str,
        message: String,
    },

    /// Descriptor could not be turned into a request (missing path param, bad URL).
    #[error("invalid downstream request: {0}")]
    InvalidRequest(String),
}

impl DownstreamError {
    /// Build a status error, pulling a readable message out of the body.
    pub fn from_status(service: &'static str, status: StatusCode, body: &[u8]) -> Self {
        DownstreamError::Status {
            service,
            status,
            message: backend_message(status, body),
        }
    }

    pub fn from_transport(service: &'static str, err: &reqwest::Error) -> Self {
        DownstreamError::Transport {
            service,
            message: err.to_string(),
            timeout: err.is_timeout(),
        }
    }

    /// Downstream HTTP status, when the backend answered at all
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            DownstreamError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

/// Extract the backend's own error text.
///
/// Spring-style bodies (`{"message": ..., "error": ...}`) yield `message`,
/// falling back to `error`; anything else is used as plain text. Empty
/// bodies fall back to the status reason phrase.
fn backend_message(status: StatusCode, body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    let text = text.trim();

    let from_json = serde_json::from_str::<serde_json::Value>(text)
        .ok()
        .and_then(|value| {
            ["message", "error", "detail"].iter().find_map(|key| {
                value
                    .get(key)
                    .and_then(|v| v.as_str())
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_owned)
            })
        });

    let message = match from_json {
        Some(message) => message,
        None if !text.is_empty() => text.to_owned(),
        None => status
            .canonical_reason()
            .unwrap_or("unknown status")
            .to_owned(),
    };

    truncate(message, MAX_MESSAGE_LEN)
}

fn truncate(mut message: String, max: usize) -> String {
    if message.len() > max {
        let mut cut = max;
        while !message.is_char_boundary(cut) {
            cut -= 1;
        }
        message.truncate(cut);
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spring_error_body_uses_message() {
        let body = br#"{"timestamp":"2026-10-16T10:00:00Z","status":409,"error":"Conflict","message":"User already exists"}"#;
        let err = DownstreamError::from_status("users", StatusCode::CONFLICT, body);
        match err {
            DownstreamError::Status { message, .. } => assert_eq!(message, "User already exists"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_json_without_message_falls_back_to_error_field() {
        let body = br#"{"status":404,"error":"Not Found","message":""}"#;
        let err = DownstreamError::from_status("bills", StatusCode::NOT_FOUND, body);
        assert!(err.to_string().ends_with("Not Found"));
    }

    #[test]
    fn test_plain_text_body_is_kept() {
        let err =
            DownstreamError::from_status("users", StatusCode::BAD_REQUEST, b"  firstName is blank ");
        assert_eq!(
            err.to_string(),
            "users service returned 400 Bad Request: firstName is blank"
        );
    }

    #[test]
    fn test_empty_body_uses_reason_phrase() {
        let err = DownstreamError::from_status("users", StatusCode::SERVICE_UNAVAILABLE, b"");
        assert!(err.to_string().ends_with("Service Unavailable"));
    }

    #[test]
    fn test_long_body_is_truncated_on_char_boundary() {
        let body = "é".repeat(400);
        let message = backend_message(StatusCode::BAD_REQUEST, body.as_bytes());
        assert!(message.len() <= MAX_MESSAGE_LEN);
        assert!(message.chars().all(|c| c == 'é'));
    }

    #[test]
    fn test_accessors() {
        let err = DownstreamError::from_status("users", StatusCode::NOT_FOUND, b"");
        assert!(err.is_not_found());
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));

        let err = DownstreamError::InvalidRequest("missing path param".into());
        assert_eq!(err.status(), None);
        assert!(!err.is_not_found());
    }
}

//! Error taxonomy for backend calls.
//!
//! Failures are split into classes the UI treats differently: a transport
//! failure gets one fixed message, an HTTP error status carries whatever the
//! backend put in the body, 401/403 become a "login required" error, and
//! domain validation (a successful response that is unusable) is its own
//! class.

use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single backend call.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("cannot reach the server; check that the backend is running")]
    Unreachable(#[source] reqwest::Error),

    #[error("login required (status: {status})")]
    Auth { status: StatusCode },

    #[error("{message}")]
    Status { status: StatusCode, message: String },

    #[error("{0}")]
    Domain(String),

    #[error("invalid response from server: {0}")]
    Decode(#[source] serde_json::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            ApiError::Unreachable(err)
        } else {
            let status = err.status().unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            ApiError::Status {
                status,
                message: err.to_string(),
            }
        }
    }
}

/// Extract a human-readable message from a failed response body.
///
/// Preference order: structured `message` / `error` / `detail` fields of a
/// JSON body, then the raw body text, then a generated message carrying the
/// status code.
pub fn extract_error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error", "detail"] {
            if let Some(message) = value.get(key).and_then(|v| v.as_str())
                && !message.is_empty()
            {
                return message.to_string();
            }
        }
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }

    format!("request failed (status: {})", status.as_u16())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_message_field_wins() {
        let message =
            extract_error_message(StatusCode::BAD_REQUEST, r#"{"message":"bad input"}"#);
        assert_eq!(message, "bad input");
    }

    #[test]
    fn error_and_detail_fields_are_fallbacks() {
        let message =
            extract_error_message(StatusCode::BAD_REQUEST, r#"{"error":"nope"}"#);
        assert_eq!(message, "nope");

        let message =
            extract_error_message(StatusCode::BAD_REQUEST, r#"{"detail":"still nope"}"#);
        assert_eq!(message, "still nope");
    }

    #[test]
    fn non_json_body_is_used_verbatim() {
        let message = extract_error_message(StatusCode::INTERNAL_SERVER_ERROR, "oops");
        assert_eq!(message, "oops");
    }

    #[test]
    fn json_without_known_fields_falls_back_to_raw_text() {
        let body = r#"{"code":42}"#;
        let message = extract_error_message(StatusCode::BAD_REQUEST, body);
        assert_eq!(message, body);
    }

    #[test]
    fn empty_body_generates_a_status_message() {
        let message = extract_error_message(StatusCode::INTERNAL_SERVER_ERROR, "");
        assert_eq!(message, "request failed (status: 500)");
    }
}

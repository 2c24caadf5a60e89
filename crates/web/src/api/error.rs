//! Backend API errors.

use serde::Deserialize;
use thiserror::Error;

/// Message when a failed response carries JSON without an `error` field.
pub const REQUEST_FAILED: &str = "Request failed";

/// Message for transport failures and unreadable error bodies.
pub const NETWORK_ERROR: &str = "Network error";

/// Errors that can occur when calling the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("Network error")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// A success response did not match the expected shape.
    #[error("Parse error: {0}")]
    Parse(String),
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

impl ApiError {
    /// Build the error for a non-success response body.
    #[must_use]
    pub fn from_body(status: u16, body: &[u8]) -> Self {
        let message = match serde_json::from_slice::<ErrorBody>(body) {
            Ok(ErrorBody { error: Some(msg) }) if !msg.trim().is_empty() => msg,
            Ok(_) => REQUEST_FAILED.to_string(),
            Err(_) => NETWORK_ERROR.to_string(),
        };
        Self::Api { status, message }
    }

    /// HTTP status from the backend, if it answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Text shown to the user: what the backend said, or `fallback` when it
    /// could not be reached.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Api { message, .. } => message.clone(),
            Self::Http(_) | Self::Parse(_) => fallback.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_field_is_used() {
        let err = ApiError::from_body(401, br#"{"error": "Invalid credentials"}"#);
        assert_eq!(err.to_string(), "Invalid credentials");
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_json_without_error_field() {
        let err = ApiError::from_body(500, br#"{"msg": "boom"}"#);
        assert_eq!(err.to_string(), REQUEST_FAILED);
        assert_eq!(err.user_message("Login failed"), REQUEST_FAILED);
    }

    #[test]
    fn test_unreadable_body() {
        let err = ApiError::from_body(502, b"<html>Bad Gateway</html>");
        assert_eq!(err.to_string(), NETWORK_ERROR);
    }

    #[test]
    fn test_parse_error_uses_fallback() {
        let err = ApiError::Parse("missing field".to_string());
        assert_eq!(err.user_message("Login failed"), "Login failed");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_user_message_prefers_backend_text() {
        let err = ApiError::from_body(400, br#"{"error": "Email already registered"}"#);
        assert_eq!(
            err.user_message("Registration failed"),
            "Email already registered"
        );
    }
}

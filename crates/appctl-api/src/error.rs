//! Errors returned by the platform API client.

use reqwest::StatusCode;
use thiserror::Error;

/// Platform API errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be sent or the body could not be decoded.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A response body did not have the expected shape.
    #[error("unexpected API response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The base URL cannot carry path segments.
    #[error("invalid API URL: {0}")]
    InvalidUrl(String),

    /// The API key was rejected.
    #[error("Unauthorized: API key invalid or missing")]
    Unauthorized,

    /// The account lacks access to the resource.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The platform rejected the request parameters.
    #[error("{0}")]
    Unprocessable(String),

    /// Any other non-success response.
    #[error("API error {status}: {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Error message from the response body.
        message: String,
    },
}

impl ApiError {
    /// Maps a non-success status and its body to an error.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = error_message(body);
        match status {
            StatusCode::UNAUTHORIZED => Self::Unauthorized,
            StatusCode::FORBIDDEN => Self::Forbidden(message),
            StatusCode::NOT_FOUND => Self::NotFound(message),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                Self::Unprocessable(message)
            }
            _ => Self::Server {
                status: status.as_u16(),
                message,
            },
        }
    }
}

/// Extracts the `error` field of a JSON error body, falling back to the
/// trimmed body text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(ToString::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_status_reads_json_error_field() {
        let err = ApiError::from_status(StatusCode::NOT_FOUND, r#"{"error":"App not found."}"#);
        assert!(matches!(err, ApiError::NotFound(ref m) if m == "App not found."));
    }

    #[test]
    fn from_status_falls_back_to_plain_body() {
        let err = ApiError::from_status(StatusCode::UNPROCESSABLE_ENTITY, "Name is taken\n");
        assert_eq!(err.to_string(), "Name is taken");
    }

    #[test]
    fn from_status_keeps_unexpected_status_codes() {
        let err = ApiError::from_status(StatusCode::SERVICE_UNAVAILABLE, "");
        assert!(matches!(err, ApiError::Server { status: 503, .. }));
    }

    #[test]
    fn from_status_maps_unauthorized() {
        let err = ApiError::from_status(StatusCode::UNAUTHORIZED, "{}");
        assert!(matches!(err, ApiError::Unauthorized));
    }
}

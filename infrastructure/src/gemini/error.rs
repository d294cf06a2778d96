//! Error types for the Gemini adapter

use abrazeq_application::GatewayError;
use thiserror::Error;

/// Result type alias for Gemini adapter operations
pub type Result<T> = std::result::Result<T, GeminiError>;

/// Errors that can occur when communicating with the Gemini API
#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("Rate limited by the API")]
    RateLimited,

    #[error("Failed to parse stream payload: {0}")]
    Parse(String),

    #[error("Stream I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<GeminiError> for GatewayError {
    fn from(err: GeminiError) -> Self {
        match err {
            GeminiError::Http(e) if e.is_connect() || e.is_timeout() => {
                GatewayError::ConnectionError(e.to_string())
            }
            GeminiError::Http(e) => GatewayError::RequestFailed(e.to_string()),
            GeminiError::Parse(message) => GatewayError::ParseError(message),
            GeminiError::Io(e) => GatewayError::ConnectionError(e.to_string()),
            other => GatewayError::RequestFailed(other.to_string()),
        }
    }
}

//! Typed error enum for the auth crate.

use thiserror::Error;

/// Errors from auth-backend operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),
    #[error("HTTP status {code}: {body}")]
    HttpStatus { code: u16, body: String },
    #[error("JSON parse error in {context}: {source}")]
    JsonParse {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("client initialization failed: {0}")]
    ClientInit(String),
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
    #[error("authorization code rejected")]
    InvalidCode,
    #[error("secure random generator failed")]
    Random,
}

impl AuthError {
    /// Whether the backend rejected the caller's credentials rather than failing.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        match self {
            Self::InvalidCode => true,
            Self::HttpStatus { code, .. } => matches!(code, 400 | 401 | 403 | 404 | 422),
            _ => false,
        }
    }
}

//! Request dispatcher error types.

use std::sync::Arc;

/// Message shown when the backend cannot be reached at all.
pub const CONNECTIVITY_MESSAGE: &str =
    "Unable to connect to the server. Please check your connection and try again.";

/// Message used when a failed response carries no usable `detail`.
pub const FALLBACK_MESSAGE: &str = "Something went wrong";

/// Errors surfaced by the dispatcher and the API facades.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    /// Transport failure (DNS, refused connection, timeout).
    ///
    /// `Display` shows only the user-facing message; the transport error is
    /// available through `source()`.
    #[error("{message}")]
    Connectivity {
        message: String,
        #[source]
        source: Arc<reqwest::Error>,
    },

    /// Non-2xx response.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// 401 from a protected endpoint; the session has already been cleared.
    #[error("your session has expired, please log in again")]
    AuthExpired,

    /// Successful response whose body is not the expected JSON.
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// The request could not be composed (bad header value, bad base URL).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Session persistence failed.
    #[error("session storage error: {0}")]
    Session(Arc<storefront_core::Error>),
}

impl ApiError {
    /// HTTP status, when the error came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            ApiError::AuthExpired => Some(401),
            _ => None,
        }
    }

    pub fn is_auth_expired(&self) -> bool {
        matches!(self, ApiError::AuthExpired)
    }

    pub fn is_connectivity(&self) -> bool {
        matches!(self, ApiError::Connectivity { .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Connectivity { message: CONNECTIVITY_MESSAGE.to_string(), source: Arc::new(err) }
    }
}

impl From<storefront_core::Error> for ApiError {
    fn from(err: storefront_core::Error) -> Self {
        ApiError::Session(Arc::new(err))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Parse(err.to_string())
    }
}

//! Crate error type.
//!
//! ERROR HANDLING
//! ==============
//! The gateway never recovers failures; every variant propagates to the
//! caller. Only the navigation guard converts errors, and it converts all of
//! them into a redirect.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Errors produced by the gateway client and its configuration.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The service answered with a non-success status. `message` is the raw
    /// response body text, unparsed.
    #[error("{message}")]
    Request { status: u16, message: String },

    /// The request never produced a response (DNS, refused, aborted).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A success response whose body is not the expected JSON.
    #[error("response decode failed: {0}")]
    Decode(#[from] serde_json::Error),

    /// The configured origin is not an absolute http(s) URL.
    #[error("invalid origin: {0}")]
    InvalidOrigin(String),

    /// A configuration value could not be parsed.
    #[error("config parse failed: {0}")]
    Config(String),
}

impl ApiError {
    /// HTTP status of a [`ApiError::Request`], `None` for every other kind.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the service rejected the session (401 or 403).
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}

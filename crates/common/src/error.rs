//! Error types for DeskShare

use thiserror::Error;

/// Result type alias using DeskShare Error
pub type Result<T> = std::result::Result<T, Error>;

/// DeskShare error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing parameter: {0}")]
    MissingParameter(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid or expired token")]
    TokenNotFound,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Failed to launch {program}: {message}")]
    ProcessLaunch { program: String, message: String },

    #[error("Invalid link: {0}")]
    Decode(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// True for errors caused by the caller's input rather than the host.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::MissingParameter(_) | Error::InvalidParameter(_) | Error::Decode(_)
        )
    }

    /// True for lookups that found nothing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::TokenNotFound | Error::NotFound(_))
    }
}

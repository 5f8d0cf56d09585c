//! Error taxonomy for the client controller and store API calls.

use thiserror::Error;

/// Failure classes surfaced to the user interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request could not complete.
    Network,
    /// The server reported no such paste.
    NotFound,
    /// The draft was rejected before any network call.
    Validation,
    /// The server rejected or failed the request.
    Server,
}

/// User-visible error state held by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiError {
    pub kind: ErrorKind,
    pub message: String,
}

impl UiError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Errors produced by store API calls.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("not found")]
    NotFound,

    #[error("server rejected request ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("invalid server URL: {0}")]
    InvalidUrl(String),
}

impl StoreError {
    /// Map a store failure onto the user-visible error taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::Network(_) | StoreError::InvalidUrl(_) => ErrorKind::Network,
            StoreError::NotFound => ErrorKind::NotFound,
            StoreError::Api { .. } => ErrorKind::Server,
        }
    }
}

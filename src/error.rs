//! Error types for the vSphere client.
//!
//! Every failure falls into one of five categories: configuration,
//! local validation, transport, remote API error, and body decoding.
//! [`VsphereError::kind`] exposes the category for exhaustive matching.

use reqwest::StatusCode;
use thiserror::Error;

use crate::types::ApiError;

/// Result type alias using [`VsphereError`].
pub type Result<T> = std::result::Result<T, VsphereError>;

/// Errors that can occur during vSphere client operations.
#[derive(Debug, Error)]
pub enum VsphereError {
    /// Invalid client configuration (malformed base URL, unusable TLS material).
    ///
    /// Raised while constructing a client, before any network activity.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An argument was rejected locally; no request was sent.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Network, TLS or timeout failure while talking to the server.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a status other than the expected one.
    #[error("API error (HTTP {status}): {error}")]
    Api {
        /// HTTP status code of the response.
        status: u16,
        /// Structured error returned by the server.
        error: ApiError,
    },

    /// A response body did not have the expected shape.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Category of a [`VsphereError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// See [`VsphereError::Configuration`].
    Configuration,
    /// See [`VsphereError::Validation`].
    Validation,
    /// See [`VsphereError::Transport`].
    Transport,
    /// See [`VsphereError::Api`].
    RemoteApi,
    /// See [`VsphereError::Decode`].
    Decode,
}

impl VsphereError {
    /// Create a configuration error with the given message.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a validation error with the given message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a remote API error.
    pub fn api(status: StatusCode, error: ApiError) -> Self {
        Self::Api {
            status: status.as_u16(),
            error,
        }
    }

    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::Validation(_) => ErrorKind::Validation,
            Self::Transport(_) => ErrorKind::Transport,
            Self::Api { .. } => ErrorKind::RemoteApi,
            Self::Decode(_) => ErrorKind::Decode,
        }
    }

    /// Returns the structured server error, if this is a remote API error.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Returns the HTTP status associated with this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns true if the server rejected the session or credentials.
    ///
    /// The stale token stays on the client; callers re-authenticate.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api { status: 401, .. })
    }
}

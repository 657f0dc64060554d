//! Error types for connectapi.
//!
//! One `thiserror` enum per concern, composed into [`AppError`] for the
//! binary via `From` conversions.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error returned from `main`
//!   - [`ConfigError`] - Config file read/parse failures
//!   - [`LoggingError`] - Tracing subscriber setup failures
//!   - `std::io::Error` - Terminal I/O failures in the interactive loop
//! - [`BackendError`] - Search/trending request failures
//! - [`DecodeError`] - Credential decoding failures
//! - [`StoreError`] - Credential store read failures
//!
//! # Recovery Strategy
//!
//! Only `AppError` is ever fatal. Backend, decode and store errors are caught
//! at the operation that issued the call and folded into view state:
//!
//! - Decode and store failures fall back to the anonymous identity (logged)
//! - Trending failures become an empty trending list (logged)
//! - Search failures become the `Error` search state shown to the user

use crate::config::ConfigError;
use crate::logging::LoggingError;
use thiserror::Error;

/// Top-level application error.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Logging could not be initialized.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// Reading commands or writing output failed.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// How a failed search is classified for the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFailureKind {
    /// The request never produced a structured answer.
    NetworkFailure,
    /// The backend answered with an explanatory message.
    BackendError,
}

/// A failed backend request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    /// Connection, timeout or transport failure.
    #[error("Network failure: {reason}")]
    Network {
        /// Transport error details.
        reason: String,
    },

    /// Non-success HTTP status.
    #[error("Backend returned status {status}")]
    Backend {
        /// HTTP status code.
        status: u16,
        /// `message` field of the error body, if the body carried one.
        message: Option<String>,
    },
}

impl BackendError {
    /// Transport failure with the given details.
    pub fn network(reason: impl Into<String>) -> Self {
        Self::Network {
            reason: reason.into(),
        }
    }

    /// Non-success status with the body's optional `message`.
    pub fn backend(status: u16, message: Option<String>) -> Self {
        Self::Backend { status, message }
    }

    /// Backend-provided explanation, ignoring empty strings.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Network { .. } => None,
            Self::Backend { message, .. } => message.as_deref().filter(|m| !m.is_empty()),
        }
    }

    /// `BackendError` when the backend explained itself, `NetworkFailure`
    /// otherwise.
    pub fn kind(&self) -> SearchFailureKind {
        if self.message().is_some() {
            SearchFailureKind::BackendError
        } else {
            SearchFailureKind::NetworkFailure
        }
    }
}

/// A credential that could not be turned into claims.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    /// The token has no payload segment.
    #[error("Invalid token: missing payload segment")]
    MissingPayload,

    /// The payload segment is not valid base64url.
    #[error("Invalid token payload encoding: {0}")]
    Base64(String),

    /// The payload is not a JSON claims object.
    #[error("Invalid token payload JSON: {0}")]
    Json(String),

    /// The `exp` claim lies in the past.
    #[error("Token expired at {exp}")]
    Expired {
        /// Expiry timestamp, seconds since the Unix epoch.
        exp: i64,
    },
}

/// The credential store could not be read.
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O error other than "not found".
    #[error("Failed to read credential at {path}: {source}")]
    Read {
        /// File that failed to read.
        path: std::path::PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

//! Error types for scan2card-client.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for scan2card-client.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ───────────────────────────────────────────────────────
    /// No session available - log in first.
    #[error("Not authenticated - no session in the credential store")]
    NotAuthenticated,

    /// The refresh protocol reached a terminal state: the refresh call
    /// failed or no refresh token was available. The session has been
    /// cleared and the login redirect already fired.
    #[error("Authentication exhausted: {0}")]
    AuthExhausted(String),

    /// A 2xx auth response was missing fields needed to proceed (no
    /// token, no user, a 2FA challenge without a user id).
    #[error("Malformed auth response: {0}")]
    MalformedAuthResponse(String),

    // ── API ──────────────────────────────────────────────────────────────────
    /// API returned a terminal error response.
    #[error("API error {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the API.
        message: String,
    },

    // ── Storage ──────────────────────────────────────────────────────────────
    /// Storage I/O error.
    #[error("Storage I/O error at {path}: {message}")]
    StorageIo {
        /// Path that caused the error.
        path: PathBuf,
        /// Error description.
        message: String,
    },

    /// Storage serialization error.
    #[error("Storage serialization error: {0}")]
    StorageSerialization(String),

    /// Generic storage error.
    #[error("Storage error: {0}")]
    Storage(String),

    // ── Infrastructure ───────────────────────────────────────────────────────
    /// Network/HTTP error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request timeout.
    #[error("Request timed out")]
    Timeout,
}

impl Error {
    /// Returns true if this error came back from the API as an
    /// authentication rejection (401/403).
    #[must_use]
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            Error::NotAuthenticated
                | Error::AuthExhausted(_)
                | Error::Api { status: 401, .. }
                | Error::Api { status: 403, .. }
        )
    }

    /// Returns true if the refresh protocol itself gave up. A UI seeing
    /// this should redirect to login rather than show a form error.
    #[must_use]
    pub fn is_auth_exhausted(&self) -> bool {
        matches!(self, Error::AuthExhausted(_))
    }

    /// Creates a storage I/O error.
    #[must_use]
    pub fn storage_io(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::StorageIo {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Convenience type alias.
pub type Result<T> = std::result::Result<T, Error>;

//! Error types for the attendance backend client.

use officehub_core::error::{AppError, ErrorKind};
use thiserror::Error;

/// Errors returned by attendance backend calls.
///
/// Underlying transport errors are flattened to strings so results can be
/// cloned into snapshots and compared in tests.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The backend could not be reached (connection refused, DNS, timeout).
    #[error("backend unreachable: {0}")]
    Connectivity(String),

    /// The backend answered with a non-success status.
    #[error("backend error: {status} - {message}")]
    Backend { status: u16, message: String },

    /// The identity is not registered with the backend.
    #[error("member {0} is not registered")]
    NotRegistered(String),

    /// The backend answered 2xx with a body we could not decode.
    #[error("invalid backend response: {0}")]
    InvalidResponse(String),

    /// The request was rejected locally before being sent.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl BackendError {
    /// HTTP status reported by the backend, if it answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Backend { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the failure means the backend is offline.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Connectivity(_))
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Backend {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            Self::Connectivity(err.to_string())
        }
    }
}

impl From<BackendError> for AppError {
    fn from(err: BackendError) -> Self {
        let kind = match &err {
            BackendError::Connectivity(_) => ErrorKind::Connectivity,
            BackendError::Backend { status: 404, .. } => ErrorKind::NotFound,
            BackendError::Backend { .. } | BackendError::InvalidResponse(_) => ErrorKind::Backend,
            BackendError::NotRegistered(_) => ErrorKind::NotRegistered,
            BackendError::InvalidRequest(_) => ErrorKind::Validation,
        };
        AppError::with_source(kind, err.to_string(), err)
    }
}

/// Result type alias using [`BackendError`].
pub type BackendResult<T> = Result<T, BackendError>;

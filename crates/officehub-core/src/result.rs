//! Convenience result type alias for OfficeHub.

use crate::error::AppError;

/// A specialized `Result` type for OfficeHub operations.
pub type AppResult<T> = Result<T, AppError>;

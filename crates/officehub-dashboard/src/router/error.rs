//! Interaction errors and the text callers see for them.

use thiserror::Error;

use officehub_backend::BackendError;
use officehub_core::error::{AppError, ErrorKind};
use officehub_core::types::CommunityId;

/// Why an interaction was rejected or failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InteractionError {
    /// The surface or caller lacks the capability.
    #[error("permission denied: {0}")]
    Permission(String),

    /// A manual refresh was attempted too soon.
    #[error("cooldown active for {remaining_seconds}s")]
    Cooldown { remaining_seconds: u64 },

    /// The caller's identity is unknown to the backend.
    #[error("identity {0} is not registered")]
    NotRegistered(String),

    /// The community has no dashboard mapping.
    #[error("community {0} is not configured")]
    UnconfiguredCommunity(CommunityId),

    /// A control was pressed on a community without a registered surface.
    #[error("community {0} has no dashboard")]
    NoSurface(CommunityId),

    /// The control id is not one this router issued.
    #[error("unknown control '{0}'")]
    UnknownControl(String),

    /// Arguments were rejected before reaching the backend.
    #[error("invalid input: {0}")]
    Validation(String),

    /// The backend call failed.
    #[error(transparent)]
    Backend(BackendError),

    /// The refresh loop is not running.
    #[error("refresh loop unavailable")]
    Unavailable,
}

impl From<BackendError> for InteractionError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::NotRegistered(identity) => Self::NotRegistered(identity),
            BackendError::InvalidRequest(message) => Self::Validation(message),
            other => Self::Backend(other),
        }
    }
}

impl InteractionError {
    /// Message shown to the caller.
    pub fn user_message(&self) -> String {
        match self {
            Self::Permission(reason) => format!("⛔ {reason}"),
            Self::Cooldown { remaining_seconds } => format!(
                "⏳ Please wait {remaining_seconds} more second{} before refreshing again.",
                if *remaining_seconds == 1 { "" } else { "s" }
            ),
            Self::NotRegistered(_) => {
                "❌ You are not registered with the office tracker. Ask an officer to link your account."
                    .to_string()
            }
            Self::UnconfiguredCommunity(id) => {
                format!("⚠️ This server (ID: {id}) is not configured for an office dashboard.")
            }
            Self::NoSurface(_) => {
                "⚠️ This server has no dashboard yet. An administrator must run setup.".to_string()
            }
            Self::UnknownControl(_) => "⚠️ This control is no longer supported.".to_string(),
            Self::Validation(message) => format!("❌ {message}"),
            Self::Backend(BackendError::Connectivity(_)) => {
                "⚠️ **Server Connection Error**: unable to reach the attendance server.".to_string()
            }
            Self::Backend(err) => format!("❌ Request failed: {err}"),
            Self::Unavailable => "⚠️ Dashboard refresh is unavailable right now.".to_string(),
        }
    }
}

impl From<InteractionError> for AppError {
    fn from(err: InteractionError) -> Self {
        let kind = match &err {
            InteractionError::Permission(_) => ErrorKind::Permission,
            InteractionError::Cooldown { .. } => ErrorKind::Cooldown,
            InteractionError::NotRegistered(_) => ErrorKind::NotRegistered,
            InteractionError::UnconfiguredCommunity(_) | InteractionError::NoSurface(_) => {
                ErrorKind::NotFound
            }
            InteractionError::UnknownControl(_) | InteractionError::Validation(_) => {
                ErrorKind::Validation
            }
            InteractionError::Backend(inner) => return AppError::from(inner.clone()),
            InteractionError::Unavailable => ErrorKind::Internal,
        };
        AppError::with_source(kind, err.to_string(), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_registered_is_distinct() {
        let err = InteractionError::from(BackendError::NotRegistered("42".into()));
        assert_eq!(err, InteractionError::NotRegistered("42".into()));
        assert!(err.user_message().contains("not registered"));
    }

    #[test]
    fn test_cooldown_message_pluralises() {
        assert!(InteractionError::Cooldown { remaining_seconds: 1 }
            .user_message()
            .contains("1 more second before"));
        assert!(InteractionError::Cooldown { remaining_seconds: 9 }
            .user_message()
            .contains("9 more seconds"));
    }
}

//! Publishing documents to chat surfaces.

pub mod http;

use async_trait::async_trait;
use thiserror::Error;

use officehub_core::error::{AppError, ErrorKind};
use officehub_core::types::{Document, MessageHandle, SurfaceId};

pub use http::ChatApiPublisher;

/// Errors returned by a [`SurfacePublisher`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PublishError {
    /// The message being edited no longer exists.
    #[error("dashboard message no longer exists")]
    MessageGone,

    /// The platform refused the request.
    #[error("chat platform rejected publish: {status} - {message}")]
    Rejected { status: u16, message: String },

    /// The platform could not be reached.
    #[error("chat platform unreachable: {0}")]
    Transport(String),
}

impl From<PublishError> for AppError {
    fn from(err: PublishError) -> Self {
        AppError::with_source(ErrorKind::Publish, err.to_string(), err)
    }
}

/// Writes documents to surfaces on the chat platform.
#[async_trait]
pub trait SurfacePublisher: Send + Sync + std::fmt::Debug {
    /// Post a new message and return its handle.
    async fn create(
        &self,
        surface: &SurfaceId,
        document: &Document,
    ) -> Result<MessageHandle, PublishError>;

    /// Replace the content of an existing message.
    async fn edit(
        &self,
        surface: &SurfaceId,
        handle: &MessageHandle,
        document: &Document,
    ) -> Result<(), PublishError>;
}

//! Accessor error types.

use thiserror::Error;

use crate::transport::TransportError;

/// Result type for accessor operations.
pub type ContentResult<T> = Result<T, ContentError>;

/// Errors returned by [`ContentAccessor`](super::ContentAccessor).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    /// The content type was empty.
    #[error("Content type must not be empty")]
    EmptyContentType,

    /// The entity id was empty.
    #[error("Entity id must not be empty (content type '{content_type}')")]
    EmptyId { content_type: String },

    /// The transport failed; shown exactly as the transport reported it.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl ContentError {
    /// The underlying transport error, if this is one.
    pub fn as_transport(&self) -> Option<&TransportError> {
        match self {
            ContentError::Transport(e) => Some(e),
            _ => None,
        }
    }
}

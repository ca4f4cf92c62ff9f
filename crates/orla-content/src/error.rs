//! Content runtime errors.

use orla_protocols::StorageError;
use thiserror::Error;

/// Host document operation failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    #[error("Element not found: {0}")]
    ElementNotFound(String),

    #[error("Duplicate element id: {0}")]
    DuplicateId(String),

    #[error("Frame insertion blocked: {0}")]
    FrameBlocked(String),

    #[error("postMessage failed: {0}")]
    PostMessage(String),
}

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Sidebar frame is not present in this document")]
    NoSidebar,

    #[error("DOM error: {0}")]
    Dom(#[from] DomError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

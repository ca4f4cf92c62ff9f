//! Content channel errors.

use thiserror::Error;

use crate::page::ErrorTag;

/// A message send did not produce a reply.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelError {
    /// Nothing is listening on the receiving end.
    #[error("Could not establish connection. Receiving end does not exist.")]
    NoReceiver,

    /// The receiver went away before replying.
    #[error("The message channel closed before a response was received")]
    Closed,

    #[error("Unexpected reply: {0}")]
    UnexpectedReply(String),

    #[error("Send failed: {0}")]
    SendFailed(String),
}

impl ChannelError {
    /// Tag reported in a reply payload.
    pub fn tag(&self) -> ErrorTag {
        ErrorTag::ContentError
    }

    /// Whether the failure means the receiver is absent or gone.
    pub fn is_disconnected(&self) -> bool {
        matches!(self, ChannelError::NoReceiver | ChannelError::Closed)
    }
}

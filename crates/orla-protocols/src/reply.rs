//! Request/response plumbing.
//!
//! A request's reply channel is a [`ReplyToken`]: it is consumed by
//! [`ReplyToken::send`], so a second reply cannot be expressed. Dropping the
//! token without sending closes the channel, and the waiting side observes
//! [`ChannelError::Closed`] instead of hanging.

use async_trait::async_trait;
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::error::ChannelError;
use crate::message::{Message, MessageSender, Reply};

/// Single-use reply channel for one inbound request.
#[derive(Debug)]
pub struct ReplyToken {
    tx: oneshot::Sender<Reply>,
}

/// Receiving half of a [`ReplyToken`].
#[derive(Debug)]
pub struct PendingReply {
    rx: oneshot::Receiver<Reply>,
}

impl ReplyToken {
    /// Create a connected token/pending pair.
    pub fn channel() -> (ReplyToken, PendingReply) {
        let (tx, rx) = oneshot::channel();
        (ReplyToken { tx }, PendingReply { rx })
    }

    /// Send the one and only reply.
    pub fn send(self, reply: Reply) -> Result<(), ChannelError> {
        self.tx.send(reply).map_err(|_| ChannelError::Closed)
    }

    /// Whether the requester stopped waiting.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl PendingReply {
    /// Wait for the reply, or for the channel to close.
    pub async fn recv(self) -> Result<Reply, ChannelError> {
        self.rx.await.map_err(|_| ChannelError::Closed)
    }
}

/// Receiver side of the extension bus for one execution context.
///
/// Returning `Some` sends that reply; returning `None` leaves the request
/// unanswered and closes its channel.
#[async_trait]
pub trait MessageHandler: Send + Sync {
    async fn handle(&self, message: Message, sender: MessageSender) -> Option<Reply>;
}

/// Run `handler` for one delivered message and complete its reply token.
pub async fn dispatch(
    handler: &dyn MessageHandler,
    message: Message,
    sender: MessageSender,
    reply: ReplyToken,
) {
    let kind = message.kind();
    match handler.handle(message, sender).await {
        Some(response) => {
            if let Err(e) = reply.send(response) {
                warn!("Reply to {} dropped: {}", kind, e);
            }
        }
        None => debug!("No reply for {}", kind),
    }
}

//! UI-originated requests.

use async_trait::async_trait;
use orla_protocols::{
    ContextKind, Message, MessageHandler, MessageSender, PageInfoReply, PageText, Reply,
};
use tracing::{Instrument, debug, warn};

use super::coordinator_core::Coordinator;
use super::transaction::Transaction;
use crate::error::RequestError;

impl Coordinator {
    /// Page info of the active tab, or an empty snapshot tagged with the
    /// reason it is missing.
    pub async fn handle_page_info_request(&self) -> PageInfoReply {
        let mut tx = Transaction::begin(Message::RequestPageInfoFromContentScript.kind());
        let span = tx.span().clone();
        async {
            let result = self
                .forward_to_active(&mut tx, Message::RequestPageInfoFromContentScript)
                .await
                .and_then(|reply| reply.into_page_info().map_err(RequestError::from));
            Self::finish(&mut tx, &result);
            result.unwrap_or_else(|e| PageInfoReply::failed(e.tag()))
        }
        .instrument(span)
        .await
    }

    /// Text of the active tab, with the same resolution and error policy as
    /// [`handle_page_info_request`](Self::handle_page_info_request).
    pub async fn handle_page_text_request(&self) -> PageText {
        let mut tx = Transaction::begin(Message::RequestPageTextFromContentScript.kind());
        let span = tx.span().clone();
        async {
            let result = self
                .forward_to_active(&mut tx, Message::GetPageText)
                .await
                .and_then(|reply| reply.into_page_text().map_err(RequestError::from));
            Self::finish(&mut tx, &result);
            result.unwrap_or_else(|e| PageText::failed(e.tag()))
        }
        .instrument(span)
        .await
    }

    /// Route `TOGGLE_SIDEBAR` / `CLOSE_SIDEBAR_REQUEST` to the active tab.
    /// Returns the runtime's `success`, or false when it could not be reached.
    pub async fn handle_sidebar_command(&self, message: Message) -> bool {
        let mut tx = Transaction::begin(message.kind());
        let span = tx.span().clone();
        async {
            let result = self
                .forward_to_active(&mut tx, message)
                .await
                .and_then(|reply| reply.into_success().map_err(RequestError::from));
            Self::finish(&mut tx, &result);
            match result {
                Ok(success) => success,
                Err(e) => {
                    warn!("Sidebar command failed: {}", e);
                    false
                }
            }
        }
        .instrument(span)
        .await
    }
}

#[async_trait]
impl MessageHandler for Coordinator {
    async fn handle(&self, message: Message, sender: MessageSender) -> Option<Reply> {
        if sender.context == ContextKind::ContentScript {
            debug!("Ignoring {} from content script", message.kind());
            return None;
        }
        match message {
            Message::RequestPageInfoFromContentScript => {
                Some(Reply::PageInfo(self.handle_page_info_request().await))
            }
            Message::RequestPageTextFromContentScript | Message::GetPageText => {
                Some(Reply::PageText(self.handle_page_text_request().await))
            }
            Message::ToggleSidebar | Message::CloseSidebarRequest => {
                Some(Reply::success(self.handle_sidebar_command(message).await))
            }
            // Probes and broadcasts are for other contexts.
            Message::PingContentScript
            | Message::RestrictedPageError { .. }
            | Message::PageInfoUpdate { .. } => None,
        }
    }
}

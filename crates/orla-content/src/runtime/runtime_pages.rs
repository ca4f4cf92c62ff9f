//! Page-state queries and the runtime's extension-bus handler.

use async_trait::async_trait;
use orla_protocols::{
    FrameMessage, Message, MessageHandler, MessageSender, PageInfo, PageMeta, PageText, Reply,
    RestrictedPageTextError,
};
use tracing::{debug, warn};

use crate::document::{HostDocument, WILDCARD_ORIGIN};

use super::runtime_core::{ContentRuntime, RuntimeInner};

impl ContentRuntime {
    /// Snapshot of the document's title, URL and icon.
    pub fn page_info(&self) -> PageInfo {
        self.inner.page_info()
    }

    /// Full document text, or `restricted_page` on a restricted URL.
    pub fn page_text(&self) -> PageText {
        match self.extract_text() {
            Ok(text) => PageText::ok(text),
            Err(e) => {
                debug!("{}", e);
                PageText::failed(e.tag())
            }
        }
    }

    fn extract_text(&self) -> Result<String, RestrictedPageTextError> {
        let url = self.inner.document.url();
        if self.inner.policy.is_restricted(&url) {
            return Err(RestrictedPageTextError { url });
        }
        Ok(self.inner.document.inner_text())
    }
}

impl RuntimeInner {
    fn page_info(&self) -> PageInfo {
        read_page_info(self.document.as_ref())
    }
}

fn read_page_info(document: &dyn HostDocument) -> PageInfo {
    PageInfo {
        title: document.title(),
        url: document.url(),
        favicon: document.icon_href().unwrap_or_default(),
    }
}

/// Fire-and-forget `PAGE_META` into the sidebar frame's window.
pub(super) fn push_page_meta(document: &dyn HostDocument, frame_id: &str) {
    let meta = PageMeta::from_page_info(&read_page_info(document));
    let message = FrameMessage::PageMeta(meta);
    if let Err(e) = document.post_to_frame(frame_id, &message, WILDCARD_ORIGIN) {
        warn!("Failed to push page metadata to sidebar: {}", e);
    }
}

#[async_trait]
impl MessageHandler for ContentRuntime {
    async fn handle(&self, message: Message, _sender: MessageSender) -> Option<Reply> {
        match message {
            Message::PingContentScript => Some(Reply::alive()),
            Message::RequestPageInfoFromContentScript => {
                Some(Reply::PageInfo(self.page_info().into()))
            }
            Message::GetPageText => Some(Reply::PageText(self.page_text())),
            Message::ToggleSidebar => {
                let result = self.toggle().await;
                if let Err(ref e) = result {
                    warn!("Toggle sidebar failed: {}", e);
                }
                Some(Reply::success(result.is_ok()))
            }
            Message::CloseSidebarRequest => {
                let result = self.hide().await;
                if let Err(ref e) = result {
                    warn!("Close sidebar failed: {}", e);
                }
                Some(Reply::success(result.is_ok()))
            }
            // Addressed to the coordinator or the UI, not to tabs.
            Message::RequestPageTextFromContentScript
            | Message::RestrictedPageError { .. }
            | Message::PageInfoUpdate { .. } => None,
        }
    }
}

//! Cross-context message taxonomy.
//!
//! Every request and broadcast exchanged over the extension bus is a variant
//! of [`Message`]; the window channel into the sidebar iframe carries
//! [`FrameMessage`]. Handlers dispatch with an exhaustive `match`, never by
//! comparing type strings.
//!
//! ## Wire format
//!
//! ```text
//! {"type": "REQUEST_PAGE_INFO_FROM_CONTENT_SCRIPT"}
//! {"type": "RESTRICTED_PAGE_ERROR", "message": "...", "url": "chrome://extensions"}
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ChannelError;
use crate::page::{PageInfoReply, PageMeta, PageText, SuccessReply};
use crate::tab::TabId;

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;

/// Extension-bus message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Message {
    /// Page metadata request (UI to coordinator, coordinator to runtime).
    RequestPageInfoFromContentScript,
    /// Page text request from the UI to the coordinator.
    RequestPageTextFromContentScript,
    /// Page text request from the coordinator to the runtime.
    GetPageText,
    /// Flip sidebar visibility.
    ToggleSidebar,
    /// Hide the sidebar.
    CloseSidebarRequest,
    /// Liveness probe for the content runtime.
    PingContentScript,
    /// Broadcast: the target page cannot be scripted.
    RestrictedPageError { message: String, url: String },
    /// Broadcast: fresh page metadata for the UI.
    PageInfoUpdate { data: PageInfoReply },
}

impl Message {
    /// Wire name of the message kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Message::RequestPageInfoFromContentScript => "REQUEST_PAGE_INFO_FROM_CONTENT_SCRIPT",
            Message::RequestPageTextFromContentScript => "REQUEST_PAGE_TEXT_FROM_CONTENT_SCRIPT",
            Message::GetPageText => "GET_PAGE_TEXT",
            Message::ToggleSidebar => "TOGGLE_SIDEBAR",
            Message::CloseSidebarRequest => "CLOSE_SIDEBAR_REQUEST",
            Message::PingContentScript => "PING_CONTENT_SCRIPT",
            Message::RestrictedPageError { .. } => "RESTRICTED_PAGE_ERROR",
            Message::PageInfoUpdate { .. } => "PAGE_INFO_UPDATE",
        }
    }

    /// Whether the sender keeps a reply channel open for this kind.
    pub fn expects_reply(&self) -> bool {
        !matches!(
            self,
            Message::RestrictedPageError { .. } | Message::PageInfoUpdate { .. }
        )
    }
}

/// Reply payload. Serialised as the bare payload object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reply {
    PageInfo(PageInfoReply),
    PageText(PageText),
    Alive { alive: bool },
    Success(SuccessReply),
}

impl Reply {
    pub fn alive() -> Self {
        Reply::Alive { alive: true }
    }

    pub fn success(success: bool) -> Self {
        Reply::Success(SuccessReply { success })
    }

    /// Extract a page-info payload or report a protocol mismatch.
    pub fn into_page_info(self) -> Result<PageInfoReply, ChannelError> {
        match self {
            Reply::PageInfo(info) => Ok(info),
            other => Err(ChannelError::UnexpectedReply(format!(
                "expected page info, got {:?}",
                other
            ))),
        }
    }

    /// Extract a page-text payload or report a protocol mismatch.
    pub fn into_page_text(self) -> Result<PageText, ChannelError> {
        match self {
            Reply::PageText(text) => Ok(text),
            other => Err(ChannelError::UnexpectedReply(format!(
                "expected page text, got {:?}",
                other
            ))),
        }
    }

    /// Extract a `{success}` acknowledgement.
    pub fn into_success(self) -> Result<bool, ChannelError> {
        match self {
            Reply::Success(ack) => Ok(ack.success),
            other => Err(ChannelError::UnexpectedReply(format!(
                "expected success flag, got {:?}",
                other
            ))),
        }
    }

    pub fn is_alive(&self) -> bool {
        matches!(self, Reply::Alive { alive: true })
    }
}

/// Execution context a message originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextKind {
    Background,
    ContentScript,
    SidebarUi,
}

/// Sender information attached to every delivered message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageSender {
    pub context: ContextKind,
    /// Tab the sender lives in, for content scripts.
    pub tab: Option<TabId>,
}

impl MessageSender {
    pub fn background() -> Self {
        Self {
            context: ContextKind::Background,
            tab: None,
        }
    }

    pub fn sidebar_ui() -> Self {
        Self {
            context: ContextKind::SidebarUi,
            tab: None,
        }
    }

    pub fn content_script(tab: TabId) -> Self {
        Self {
            context: ContextKind::ContentScript,
            tab: Some(tab),
        }
    }
}

/// Window-channel message posted from the content runtime into the sidebar
/// iframe. Never travels over the extension bus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FrameMessage {
    PageMeta(PageMeta),
}

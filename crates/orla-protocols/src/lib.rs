//! # Orla Protocols
//!
//! Shared vocabulary for every Orla execution context: the background
//! coordinator, the content-script runtime living in a tab, and the sidebar UI.
//! Contains only data types and interface definitions - no browser bindings.
//!
//! ## Core Items
//!
//! - [`Message`] - Closed set of cross-context request and broadcast kinds
//! - [`Reply`] - Payloads sent back on a request's reply channel
//! - [`ReplyToken`] - Single-use reply channel handed to message handlers
//! - [`FrameMessage`] - Window-channel messages pushed into the sidebar iframe
//! - [`RestrictedUrlPolicy`] - Decides which documents may not be scripted
//! - [`capability`] - Traits for the browser capabilities the core consumes

pub mod capability;
pub mod error;
pub mod message;
pub mod page;
pub mod reply;
pub mod restricted;
pub mod tab;

pub use capability::{
    Broadcaster, BrowserServices, KeyValueStore, ScriptInjector, SidePanel, TabMessenger,
    TabQuery,
};
pub use error::{
    ChannelError, HostError, InjectionError, NoActiveTabError, RestrictedPageTextError,
    StorageError,
};
pub use message::{ContextKind, FrameMessage, Message, MessageSender, Reply};
pub use page::{ErrorTag, PageInfo, PageInfoReply, PageMeta, PageText, SuccessReply};
pub use reply::{MessageHandler, PendingReply, ReplyToken, dispatch};
pub use restricted::RestrictedUrlPolicy;
pub use tab::{TabContext, TabId, TabStatus, WindowId};

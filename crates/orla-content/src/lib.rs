//! Content-script side of Orla.
//!
//! Provides the runtime that lives inside a tab's document and the bridge that
//! lives inside the sidebar iframe.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────── tab document ────────────────────────┐
//! │                                                              │
//! │  ContentRuntime ──owns──► sidebar <iframe> ─── SidebarBridge  │
//! │        ▲                        ▲    window.postMessage      │
//! │        │ extension bus          └──── PAGE_META ─────────────│
//! └────────┼─────────────────────────────────────────────────────┘
//!          │ REQUEST_PAGE_INFO / GET_PAGE_TEXT / TOGGLE / PING
//!   background coordinator
//! ```
//!
//! The runtime is the only component with DOM access. All DOM work goes
//! through [`HostDocument`], so the same runtime drives a real page binding
//! or the in-memory [`MemoryDocument`].

mod bridge;
mod document;
mod error;
mod memory_document;
pub mod runtime;

pub use bridge::{BridgeOutcome, SidebarBridge};
pub use document::{
    DomEventKind, DomListener, EventDisposition, FrameSpec, FrameStyle, FrameWindow,
    HostDocument, WILDCARD_ORIGIN,
};
pub use error::{ContentError, DomError};
pub use memory_document::{DispatchResult, MemoryDocument, PostedMessage};
pub use runtime::{ContentRuntime, InitOutcome, Visibility};

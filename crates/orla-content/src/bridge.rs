//! Sidebar iframe bridge.
//!
//! Lives inside the sidebar frame's window and receives `PAGE_META` pushes
//! from the content runtime over `window.postMessage`. The sender posts with a
//! wildcard target origin because the host page's origin varies per tab, so
//! the bridge never filters on origin; it validates the message shape instead
//! and ignores anything else posted to the window.

use orla_protocols::{FrameMessage, PageMeta};
use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, trace};

use crate::document::FrameWindow;

/// What the bridge did with a window message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeOutcome {
    /// A `PAGE_META` push was accepted.
    Accepted,
    /// Not an Orla frame message.
    Ignored,
}

/// Receiving end of the window channel.
pub struct SidebarBridge {
    meta: watch::Sender<Option<PageMeta>>,
}

impl Default for SidebarBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl SidebarBridge {
    pub fn new() -> Self {
        let (meta, _) = watch::channel(None);
        Self { meta }
    }

    /// Handle one `message` event's data.
    pub fn receive(&self, data: &Value, origin: &str) -> BridgeOutcome {
        match serde_json::from_value::<FrameMessage>(data.clone()) {
            Ok(FrameMessage::PageMeta(meta)) => {
                debug!("PAGE_META for {} from {}", meta.url, origin);
                self.meta.send_replace(Some(meta));
                BridgeOutcome::Accepted
            }
            Err(e) => {
                trace!("Ignoring window message from {}: {}", origin, e);
                BridgeOutcome::Ignored
            }
        }
    }

    /// Most recent metadata, if any push arrived.
    pub fn latest(&self) -> Option<PageMeta> {
        self.meta.borrow().clone()
    }

    /// Watch for metadata pushes.
    pub fn subscribe(&self) -> watch::Receiver<Option<PageMeta>> {
        self.meta.subscribe()
    }
}

impl FrameWindow for SidebarBridge {
    fn post_message(&self, data: Value, origin: &str) {
        self.receive(&data, origin);
    }
}

#[cfg(test)]
#[path = "bridge_tests.rs"]
mod tests;

//! Host document abstraction.
//!
//! The slice of the DOM the content runtime touches: page metadata reads,
//! the sidebar iframe element, event listeners on it, the host page's scroll
//! lock and `postMessage` into the frame's window.

use std::sync::Arc;

use orla_protocols::FrameMessage;
use serde_json::Value;

use crate::error::DomError;

/// Target origin used when posting into the sidebar frame. The host page's
/// origin differs per tab, so the sender cannot name it.
pub const WILDCARD_ORIGIN: &str = "*";

/// Visual and hit-test state of the sidebar frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameStyle {
    /// Slid into view.
    pub visible: bool,
    /// Receives pointer events.
    pub interactive: bool,
}

impl FrameStyle {
    pub fn shown() -> Self {
        Self {
            visible: true,
            interactive: true,
        }
    }

    /// Fully hidden and detached from hit testing.
    pub fn hidden() -> Self {
        Self {
            visible: false,
            interactive: false,
        }
    }

    /// Visually gone but still interactive, during the hide transition.
    pub fn hiding() -> Self {
        Self {
            visible: false,
            interactive: true,
        }
    }
}

/// Sidebar iframe to be appended to the document body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSpec {
    pub id: String,
    pub src: String,
    pub width_px: u32,
    pub style: FrameStyle,
}

/// DOM events the runtime listens for on the sidebar frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomEventKind {
    Load,
    PointerEnter,
    PointerLeave,
    Wheel,
    TouchMove,
}

impl DomEventKind {
    pub const ALL: [DomEventKind; 5] = [
        DomEventKind::Load,
        DomEventKind::PointerEnter,
        DomEventKind::PointerLeave,
        DomEventKind::Wheel,
        DomEventKind::TouchMove,
    ];
}

/// What a listener asks the document to do with the event afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDisposition {
    Continue,
    /// Do not bubble to the host page.
    StopPropagation,
}

/// Event listener attached to a document element.
pub trait DomListener: Send + Sync {
    fn on_event(&self, kind: DomEventKind) -> EventDisposition;
}

/// Receiving window of a `postMessage` call.
pub trait FrameWindow: Send + Sync {
    /// Deliver a structured-cloned message posted from `origin`.
    fn post_message(&self, data: Value, origin: &str);
}

/// Document of the tab the content runtime lives in.
pub trait HostDocument: Send + Sync {
    /// `location.href`.
    fn url(&self) -> String;

    /// `document.title`.
    fn title(&self) -> String;

    /// Resolved href of the first `link[rel~="icon"]`, if any.
    fn icon_href(&self) -> Option<String>;

    /// `document.body.innerText`.
    fn inner_text(&self) -> String;

    /// Whether an element with `id` is attached.
    fn element_exists(&self, id: &str) -> bool;

    fn append_frame(&self, spec: &FrameSpec) -> Result<(), DomError>;

    fn frame_style(&self, id: &str) -> Option<FrameStyle>;

    fn set_frame_style(&self, id: &str, style: FrameStyle) -> Result<(), DomError>;

    /// Suspend or restore host page scrolling.
    fn set_scroll_locked(&self, locked: bool);

    fn is_scroll_locked(&self) -> bool;

    /// Set a document-level marker; returns false when it was already set.
    fn claim_marker(&self, name: &str) -> bool;

    fn add_frame_listener(
        &self,
        frame_id: &str,
        kind: DomEventKind,
        listener: Arc<dyn DomListener>,
    ) -> Result<(), DomError>;

    /// `frame.contentWindow.postMessage(message, target_origin)`.
    fn post_to_frame(
        &self,
        frame_id: &str,
        message: &FrameMessage,
        target_origin: &str,
    ) -> Result<(), DomError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_styles() {
        assert!(FrameStyle::shown().visible && FrameStyle::shown().interactive);
        assert!(!FrameStyle::hidden().visible && !FrameStyle::hidden().interactive);
        assert!(!FrameStyle::hiding().visible && FrameStyle::hiding().interactive);
    }

    #[test]
    fn test_all_event_kinds_distinct() {
        let kinds: std::collections::HashSet<_> = DomEventKind::ALL.iter().collect();
        assert_eq!(kinds.len(), DomEventKind::ALL.len());
    }
}

//! In-memory host document.
//!
//! Holds just enough DOM state to run the content runtime without a browser:
//! page metadata, appended frames, listeners, markers, the scroll lock and a
//! log of posted window messages.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use orla_protocols::FrameMessage;
use parking_lot::Mutex;
use serde_json::Value;
use tracing::trace;

use crate::document::{
    DomEventKind, DomListener, EventDisposition, FrameSpec, FrameStyle, FrameWindow,
    HostDocument,
};
use crate::error::DomError;

/// A message posted into a frame window.
#[derive(Debug, Clone, PartialEq)]
pub struct PostedMessage {
    pub frame_id: String,
    pub data: Value,
    pub target_origin: String,
}

/// Outcome of dispatching an event on a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    /// Number of listeners invoked.
    pub handled: usize,
    /// Whether the event bubbled on to the host page.
    pub propagated: bool,
}

struct Listener {
    frame_id: String,
    kind: DomEventKind,
    callback: Arc<dyn DomListener>,
}

#[derive(Default)]
struct DocumentState {
    url: String,
    title: String,
    icon_href: Option<String>,
    text: String,
    frames: Vec<FrameSpec>,
    listeners: Vec<Listener>,
    markers: HashSet<String>,
    scroll_locked: bool,
    frames_blocked: bool,
    windows: HashMap<String, Arc<dyn FrameWindow>>,
    posted: Vec<PostedMessage>,
}

/// DOM stand-in for one loaded page.
#[derive(Default)]
pub struct MemoryDocument {
    state: Mutex<DocumentState>,
}

impl MemoryDocument {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            state: Mutex::new(DocumentState {
                url: url.into(),
                title: title.into(),
                ..Default::default()
            }),
        }
    }

    /// Declare a `link[rel="icon"]`.
    pub fn with_icon(self, href: impl Into<String>) -> Self {
        self.state.lock().icon_href = Some(href.into());
        self
    }

    /// Set the body text.
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.state.lock().text = text.into();
        self
    }

    /// Simulate `history.pushState` / a same-document URL change.
    pub fn set_url(&self, url: impl Into<String>) {
        self.state.lock().url = url.into();
    }

    /// Refuse frame insertion, as a page with a restrictive `frame-src` policy does.
    pub fn block_frames(&self, blocked: bool) {
        self.state.lock().frames_blocked = blocked;
    }

    /// Connect a frame's content window so posted messages reach it.
    pub fn attach_frame_window(&self, frame_id: impl Into<String>, window: Arc<dyn FrameWindow>) {
        self.state.lock().windows.insert(frame_id.into(), window);
    }

    /// Fire `kind` on the frame and run its listeners.
    pub fn dispatch(&self, frame_id: &str, kind: DomEventKind) -> DispatchResult {
        // Listeners re-enter the document, so run them unlocked.
        let callbacks: Vec<Arc<dyn DomListener>> = self
            .state
            .lock()
            .listeners
            .iter()
            .filter(|l| l.frame_id == frame_id && l.kind == kind)
            .map(|l| l.callback.clone())
            .collect();

        let mut propagated = true;
        for callback in &callbacks {
            if callback.on_event(kind) == EventDisposition::StopPropagation {
                propagated = false;
            }
        }
        trace!("Dispatched {:?} on {} to {} listeners", kind, frame_id, callbacks.len());
        DispatchResult {
            handled: callbacks.len(),
            propagated,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.state.lock().frames.len()
    }

    pub fn frame(&self, id: &str) -> Option<FrameSpec> {
        self.state.lock().frames.iter().find(|f| f.id == id).cloned()
    }

    pub fn listener_count(&self) -> usize {
        self.state.lock().listeners.len()
    }

    pub fn posted_messages(&self) -> Vec<PostedMessage> {
        self.state.lock().posted.clone()
    }
}

impl HostDocument for MemoryDocument {
    fn url(&self) -> String {
        self.state.lock().url.clone()
    }

    fn title(&self) -> String {
        self.state.lock().title.clone()
    }

    fn icon_href(&self) -> Option<String> {
        self.state.lock().icon_href.clone()
    }

    fn inner_text(&self) -> String {
        self.state.lock().text.clone()
    }

    fn element_exists(&self, id: &str) -> bool {
        self.state.lock().frames.iter().any(|f| f.id == id)
    }

    fn append_frame(&self, spec: &FrameSpec) -> Result<(), DomError> {
        let mut state = self.state.lock();
        if state.frames_blocked {
            return Err(DomError::FrameBlocked(spec.id.clone()));
        }
        if state.frames.iter().any(|f| f.id == spec.id) {
            return Err(DomError::DuplicateId(spec.id.clone()));
        }
        state.frames.push(spec.clone());
        Ok(())
    }

    fn frame_style(&self, id: &str) -> Option<FrameStyle> {
        self.state
            .lock()
            .frames
            .iter()
            .find(|f| f.id == id)
            .map(|f| f.style)
    }

    fn set_frame_style(&self, id: &str, style: FrameStyle) -> Result<(), DomError> {
        let mut state = self.state.lock();
        let frame = state
            .frames
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| DomError::ElementNotFound(id.to_string()))?;
        frame.style = style;
        Ok(())
    }

    fn set_scroll_locked(&self, locked: bool) {
        self.state.lock().scroll_locked = locked;
    }

    fn is_scroll_locked(&self) -> bool {
        self.state.lock().scroll_locked
    }

    fn claim_marker(&self, name: &str) -> bool {
        self.state.lock().markers.insert(name.to_string())
    }

    fn add_frame_listener(
        &self,
        frame_id: &str,
        kind: DomEventKind,
        listener: Arc<dyn DomListener>,
    ) -> Result<(), DomError> {
        let mut state = self.state.lock();
        if !state.frames.iter().any(|f| f.id == frame_id) {
            return Err(DomError::ElementNotFound(frame_id.to_string()));
        }
        state.listeners.push(Listener {
            frame_id: frame_id.to_string(),
            kind,
            callback: listener,
        });
        Ok(())
    }

    fn post_to_frame(
        &self,
        frame_id: &str,
        message: &FrameMessage,
        target_origin: &str,
    ) -> Result<(), DomError> {
        let data =
            serde_json::to_value(message).map_err(|e| DomError::PostMessage(e.to_string()))?;

        let (window, origin) = {
            let mut state = self.state.lock();
            if !state.frames.iter().any(|f| f.id == frame_id) {
                return Err(DomError::ElementNotFound(frame_id.to_string()));
            }
            state.posted.push(PostedMessage {
                frame_id: frame_id.to_string(),
                data: data.clone(),
                target_origin: target_origin.to_string(),
            });
            let origin = page_origin(&state.url);
            (state.windows.get(frame_id).cloned(), origin)
        };

        if let Some(window) = window {
            window.post_message(data, &origin);
        }
        Ok(())
    }
}

fn page_origin(url: &str) -> String {
    url::Url::parse(url)
        .map(|u| u.origin().ascii_serialization())
        .unwrap_or_else(|_| "null".to_string())
}

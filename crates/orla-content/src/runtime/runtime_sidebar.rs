//! Sidebar visibility transitions and scroll isolation.

use std::sync::{Arc, Weak};
use std::time::Duration;

use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::document::{DomEventKind, DomListener, EventDisposition, FrameStyle, HostDocument};
use crate::error::ContentError;

use super::runtime_core::{ContentRuntime, RuntimeInner, Visibility};
use super::runtime_pages::push_page_meta;

impl ContentRuntime {
    /// Slide the sidebar in and persist the preference.
    pub async fn show(&self) -> Result<(), ContentError> {
        self.set_visibility(Visibility::Shown).await
    }

    /// Slide the sidebar out and persist the preference.
    ///
    /// The frame stays hit-testable until the transition has elapsed, then
    /// stops receiving pointer events.
    pub async fn hide(&self) -> Result<(), ContentError> {
        self.set_visibility(Visibility::Hidden).await
    }

    /// Flip visibility; returns the new state.
    pub async fn toggle(&self) -> Result<Visibility, ContentError> {
        let next = match self.visibility() {
            Visibility::Shown => Visibility::Hidden,
            Visibility::Hidden => Visibility::Shown,
        };
        self.set_visibility(next).await?;
        Ok(next)
    }

    /// The preference write is best effort: the page already shows the new
    /// state, so a storage failure is only logged.
    async fn set_visibility(&self, visibility: Visibility) -> Result<(), ContentError> {
        self.inner.apply_visibility(visibility)?;
        if let Err(e) = self.inner.persist(visibility).await {
            warn!("Could not persist sidebar {:?} preference: {}", visibility, e);
        }
        Ok(())
    }
}

impl RuntimeInner {
    /// Apply `visibility` to the frame. Cancels any pending detach.
    pub(super) fn apply_visibility(
        self: &Arc<Self>,
        visibility: Visibility,
    ) -> Result<(), ContentError> {
        let id = &self.config.frame_id;
        if !self.document.element_exists(id) {
            return Err(ContentError::NoSidebar);
        }

        let mut state = self.state.lock();
        if let Some(pending) = state.pending_detach.take() {
            pending.cancel();
        }

        match visibility {
            Visibility::Shown => {
                self.document.set_frame_style(id, FrameStyle::shown())?;
            }
            Visibility::Hidden => {
                if self.document.is_scroll_locked() {
                    self.document.set_scroll_locked(false);
                }
                let detached = self.document.frame_style(id) == Some(FrameStyle::hidden());
                if !detached {
                    self.document.set_frame_style(id, FrameStyle::hiding())?;
                    let token = CancellationToken::new();
                    state.pending_detach = Some(token.clone());
                    self.schedule_detach(token);
                }
            }
        }

        state.visibility = visibility;
        debug!("Sidebar {:?}", visibility);
        Ok(())
    }

    pub(super) async fn persist(&self, visibility: Visibility) -> Result<(), ContentError> {
        self.storage
            .set(&self.config.storage_key, Value::Bool(visibility.is_shown()))
            .await?;
        Ok(())
    }

    pub(super) fn schedule_detach(self: &Arc<Self>, token: CancellationToken) {
        let weak = Arc::downgrade(self);
        let delay = Duration::from_millis(self.config.transition_ms);
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    if let Some(inner) = weak.upgrade() {
                        inner.finish_hide(&token);
                    }
                }
            }
        });
    }

    /// Remove the frame from hit testing once the hide transition is over.
    fn finish_hide(&self, token: &CancellationToken) {
        let mut state = self.state.lock();
        if token.is_cancelled() || state.visibility != Visibility::Hidden {
            return;
        }
        state.pending_detach = None;
        if let Err(e) = self
            .document
            .set_frame_style(&self.config.frame_id, FrameStyle::hidden())
        {
            warn!("Failed to detach sidebar after transition: {}", e);
        }
    }
}

/// Listener attached to the sidebar frame.
pub(super) struct SidebarEvents {
    document: Weak<dyn HostDocument>,
    frame_id: String,
}

impl SidebarEvents {
    pub(super) fn new(document: Weak<dyn HostDocument>, frame_id: String) -> Self {
        Self { document, frame_id }
    }
}

impl DomListener for SidebarEvents {
    fn on_event(&self, kind: DomEventKind) -> EventDisposition {
        let Some(document) = self.document.upgrade() else {
            return EventDisposition::Continue;
        };
        match kind {
            DomEventKind::Load => {
                push_page_meta(document.as_ref(), &self.frame_id);
                EventDisposition::Continue
            }
            DomEventKind::PointerEnter => {
                document.set_scroll_locked(true);
                EventDisposition::Continue
            }
            DomEventKind::PointerLeave => {
                document.set_scroll_locked(false);
                EventDisposition::Continue
            }
            DomEventKind::Wheel | DomEventKind::TouchMove => EventDisposition::StopPropagation,
        }
    }
}

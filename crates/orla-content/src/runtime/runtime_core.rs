//! ContentRuntime core: state, construction and initialization.

use std::sync::Arc;

use orla_config::ContentConfig;
use orla_protocols::{KeyValueStore, RestrictedUrlPolicy};
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::document::{DomEventKind, FrameSpec, FrameStyle, HostDocument};
use crate::error::ContentError;

use super::runtime_sidebar::SidebarEvents;

/// Sidebar visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Shown,
    Hidden,
}

impl Visibility {
    pub fn is_shown(self) -> bool {
        self == Visibility::Shown
    }
}

/// Result of [`ContentRuntime::initialize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// Sidebar created or adopted, listeners in place.
    Initialized,
    /// This runtime instance already ran its setup.
    AlreadyInitialized,
    /// Restricted document: nothing was touched.
    Skipped,
}

pub(super) struct SidebarState {
    pub(super) initialized: bool,
    pub(super) visibility: Visibility,
    /// Delayed hit-test detach of an in-flight hide transition.
    pub(super) pending_detach: Option<CancellationToken>,
}

pub(super) struct RuntimeInner {
    pub(super) document: Arc<dyn HostDocument>,
    pub(super) storage: Arc<dyn KeyValueStore>,
    pub(super) policy: RestrictedUrlPolicy,
    pub(super) config: ContentConfig,
    pub(super) state: Mutex<SidebarState>,
}

/// Runtime living inside one tab document.
#[derive(Clone)]
pub struct ContentRuntime {
    pub(super) inner: Arc<RuntimeInner>,
}

impl ContentRuntime {
    pub fn new(
        document: Arc<dyn HostDocument>,
        storage: Arc<dyn KeyValueStore>,
        config: ContentConfig,
        policy: RestrictedUrlPolicy,
    ) -> Self {
        Self {
            inner: Arc::new(RuntimeInner {
                document,
                storage,
                policy,
                config,
                state: Mutex::new(SidebarState {
                    initialized: false,
                    visibility: Visibility::Hidden,
                    pending_detach: None,
                }),
            }),
        }
    }

    /// Per-load setup.
    ///
    /// Restricted documents are left untouched. Otherwise the sidebar frame is
    /// created hidden (or adopted if a previous injection already created it),
    /// listeners are attached once per document, and the persisted visibility
    /// preference is restored.
    pub async fn initialize(&self) -> Result<InitOutcome, ContentError> {
        let url = self.inner.document.url();
        if self.is_restricted() {
            debug!("Skipping sidebar setup on restricted page {}", url);
            return Ok(InitOutcome::Skipped);
        }

        {
            let mut state = self.inner.state.lock();
            if state.initialized {
                return Ok(InitOutcome::AlreadyInitialized);
            }
            state.initialized = true;
        }

        // A failed setup leaves the runtime retryable.
        if let Err(e) = self
            .inner
            .ensure_frame()
            .and_then(|_| self.inner.install_listeners())
        {
            self.inner.state.lock().initialized = false;
            return Err(e);
        }

        let key = &self.inner.config.storage_key;
        match self.inner.storage.get_bool(key).await {
            Ok(Some(true)) => {
                self.inner.apply_visibility(Visibility::Shown)?;
            }
            Ok(_) => {}
            Err(e) => warn!("Could not read {} preference, keeping sidebar hidden: {}", key, e),
        }

        info!(
            "Sidebar ready on {} ({:?})",
            url,
            self.inner.state.lock().visibility
        );
        Ok(InitOutcome::Initialized)
    }

    /// Whether the current document URL is off limits.
    pub fn is_restricted(&self) -> bool {
        self.inner.policy.is_restricted(&self.inner.document.url())
    }

    /// Whether the sidebar frame is attached to the document.
    pub fn has_sidebar(&self) -> bool {
        self.inner.document.element_exists(&self.inner.config.frame_id)
    }

    pub fn visibility(&self) -> Visibility {
        self.inner.state.lock().visibility
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.inner.document.is_scroll_locked()
    }

    pub fn frame_id(&self) -> &str {
        &self.inner.config.frame_id
    }
}

impl RuntimeInner {
    /// Create the hidden sidebar frame unless the document already has one.
    ///
    /// An adopted frame caught mid-hide gets a fresh detach timer, since the
    /// runtime that started the transition may be gone.
    fn ensure_frame(self: &Arc<Self>) -> Result<(), ContentError> {
        let id = &self.config.frame_id;
        if self.document.element_exists(id) {
            let style = self.document.frame_style(id).unwrap_or(FrameStyle::hidden());
            let mut state = self.state.lock();
            if style.visible {
                state.visibility = Visibility::Shown;
            } else {
                state.visibility = Visibility::Hidden;
                if style.interactive {
                    let token = CancellationToken::new();
                    state.pending_detach = Some(token.clone());
                    self.schedule_detach(token);
                }
            }
            debug!("Adopting existing sidebar frame {}", id);
            return Ok(());
        }

        self.document.append_frame(&FrameSpec {
            id: id.clone(),
            src: self.config.sidebar_url.clone(),
            width_px: self.config.frame_width_px,
            style: FrameStyle::hidden(),
        })?;
        debug!("Created sidebar frame {}", id);
        Ok(())
    }

    /// Attach frame listeners, once per document.
    ///
    /// Listeners outlive the runtime that installed them, so they only hold
    /// the document.
    fn install_listeners(&self) -> Result<(), ContentError> {
        if !self.document.claim_marker(&self.config.listener_marker) {
            debug!("Sidebar listeners already installed");
            return Ok(());
        }

        let listener = Arc::new(SidebarEvents::new(
            Arc::downgrade(&self.document),
            self.config.frame_id.clone(),
        ));
        for kind in DomEventKind::ALL {
            self.document
                .add_frame_listener(&self.config.frame_id, kind, listener.clone())?;
        }
        Ok(())
    }
}

//! Tab and window identity as reported by the browser.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Browser tab identifier, stable for the lifetime of the tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(pub i64);

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Browser window identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(pub i64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Navigation status of a tab's current document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabStatus {
    /// Document is still loading.
    #[default]
    Loading,
    /// Document finished loading.
    Complete,
}

/// Snapshot of a tab, created by the browser and read-only to Orla.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabContext {
    pub id: TabId,
    pub window_id: WindowId,
    pub url: String,
    pub active: bool,
    /// Whether the tab's window currently has focus.
    pub focused: bool,
    pub status: TabStatus,
}

impl TabContext {
    /// Create an active, focused, fully loaded tab snapshot.
    pub fn new(id: i64, url: impl Into<String>) -> Self {
        Self {
            id: TabId(id),
            window_id: WindowId(1),
            url: url.into(),
            active: true,
            focused: true,
            status: TabStatus::Complete,
        }
    }

    /// Set the owning window.
    pub fn in_window(mut self, window_id: i64) -> Self {
        self.window_id = WindowId(window_id);
        self
    }

    /// Set the navigation status.
    pub fn with_status(mut self, status: TabStatus) -> Self {
        self.status = status;
        self
    }

    /// Whether the document finished loading.
    pub fn is_complete(&self) -> bool {
        self.status == TabStatus::Complete
    }
}

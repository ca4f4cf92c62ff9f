//! Content runtime, background coordinator and restricted-page settings.

use serde::{Deserialize, Serialize};

/// Content-script runtime configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// DOM id of the sidebar iframe.
    #[serde(default = "default_frame_id")]
    pub frame_id: String,

    /// Extension resource loaded inside the iframe.
    #[serde(default = "default_sidebar_url")]
    pub sidebar_url: String,

    #[serde(default = "default_frame_width")]
    pub frame_width_px: u32,

    /// Show/hide transition length; hiding detaches interactivity after it.
    #[serde(default = "default_transition_ms")]
    pub transition_ms: u64,

    /// Durable key holding the global visibility preference.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Document marker guarding listener installation.
    #[serde(default = "default_listener_marker")]
    pub listener_marker: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            frame_id: default_frame_id(),
            sidebar_url: default_sidebar_url(),
            frame_width_px: default_frame_width(),
            transition_ms: default_transition_ms(),
            storage_key: default_storage_key(),
            listener_marker: default_listener_marker(),
        }
    }
}

fn default_frame_id() -> String {
    "orla-sidebar-frame".to_string()
}

fn default_sidebar_url() -> String {
    "sidebar.html".to_string()
}

fn default_frame_width() -> u32 {
    400
}

fn default_transition_ms() -> u64 {
    300
}

fn default_storage_key() -> String {
    "sidebarOpen".to_string()
}

fn default_listener_marker() -> String {
    "orlaSidebarListeners".to_string()
}

/// Background coordinator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackgroundConfig {
    /// Script resource injected into tabs.
    #[serde(default = "default_content_script")]
    pub content_script: String,

    /// User-facing text of `RESTRICTED_PAGE_ERROR`.
    #[serde(default = "default_restricted_message")]
    pub restricted_message: String,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            content_script: default_content_script(),
            restricted_message: default_restricted_message(),
        }
    }
}

fn default_content_script() -> String {
    "content.js".to_string()
}

fn default_restricted_message() -> String {
    "Orla can't read this page. Browser-internal, extension, and local file pages are restricted."
        .to_string()
}

/// Documents that may not be scripted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestrictedConfig {
    #[serde(default = "default_schemes")]
    pub schemes: Vec<String>,

    #[serde(default = "default_hosts")]
    pub hosts: Vec<String>,
}

impl Default for RestrictedConfig {
    fn default() -> Self {
        Self {
            schemes: default_schemes(),
            hosts: default_hosts(),
        }
    }
}

fn default_schemes() -> Vec<String> {
    [
        "chrome",
        "chrome-extension",
        "edge",
        "about",
        "view-source",
        "file",
        "moz-extension",
        "devtools",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_hosts() -> Vec<String> {
    vec![
        "chromewebstore.google.com".to_string(),
        "chrome.google.com".to_string(),
    ]
}

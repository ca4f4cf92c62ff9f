//! Content-script runtime.
//!
//! One [`ContentRuntime`] per tab document. It exclusively owns the sidebar
//! iframe (created at most once, never destroyed, always reused), its
//! visibility and the host page's scroll lock, and it answers page-state
//! queries from the background coordinator.

mod runtime_core;
mod runtime_pages;
mod runtime_sidebar;

pub use runtime_core::{ContentRuntime, InitOutcome, Visibility};

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod tests;

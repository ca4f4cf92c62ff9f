//! Script injection errors.

use thiserror::Error;

use crate::page::ErrorTag;
use crate::tab::TabId;

/// The content runtime could not be placed into a tab.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InjectionError {
    /// The document's URL forbids scripting.
    #[error("Cannot inject into restricted page: {url}")]
    Restricted { url: String },

    /// The tab no longer exists.
    #[error("Tab {0} is closed")]
    TabClosed(TabId),

    #[error("Injection failed: {0}")]
    Failed(String),
}

impl InjectionError {
    /// Whether this failure should be reported to the user as a restricted page.
    pub fn is_restricted(&self) -> bool {
        matches!(self, InjectionError::Restricted { .. })
    }

    /// Tag reported in a direct reply payload.
    pub fn tag(&self) -> ErrorTag {
        match self {
            InjectionError::Restricted { .. } => ErrorTag::RestrictedPage,
            InjectionError::TabClosed(_) | InjectionError::Failed(_) => ErrorTag::ContentError,
        }
    }
}

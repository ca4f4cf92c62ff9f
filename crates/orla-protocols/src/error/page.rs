//! Page-state resolution errors.

use thiserror::Error;

use crate::page::ErrorTag;

/// No eligible tab was found in the focused window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("No active tab in the focused window")]
pub struct NoActiveTabError;

impl NoActiveTabError {
    pub fn tag(&self) -> ErrorTag {
        ErrorTag::NoActiveTab
    }
}

/// Text extraction was attempted on a restricted document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Cannot read text of restricted page: {url}")]
pub struct RestrictedPageTextError {
    pub url: String,
}

impl RestrictedPageTextError {
    pub fn tag(&self) -> ErrorTag {
        ErrorTag::RestrictedPage
    }
}

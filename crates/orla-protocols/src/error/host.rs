//! Browser host capability errors.

use thiserror::Error;

use crate::tab::TabId;

/// A browser-chrome capability (tab query, side panel) failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("Tab not found: {0}")]
    TabNotFound(TabId),

    #[error("Side panel unavailable: {0}")]
    SidePanel(String),

    #[error("Tab query failed: {0}")]
    Query(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_error_display() {
        assert_eq!(HostError::TabNotFound(TabId(3)).to_string(), "Tab not found: 3");
        assert!(HostError::SidePanel("no user gesture".to_string())
            .to_string()
            .contains("no user gesture"));
        assert!(HostError::Query("window closed".to_string())
            .to_string()
            .contains("Tab query failed"));
    }
}

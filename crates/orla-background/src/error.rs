//! Error types for coordinator transactions.

use orla_protocols::{ChannelError, ErrorTag, HostError, InjectionError, NoActiveTabError};
use thiserror::Error;

/// Why a routed request did not produce a content-script reply.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    #[error(transparent)]
    NoActiveTab(#[from] NoActiveTabError),

    #[error(transparent)]
    Injection(#[from] InjectionError),

    #[error(transparent)]
    Channel(#[from] ChannelError),

    #[error(transparent)]
    Host(#[from] HostError),
}

impl RequestError {
    /// Tag reported to the UI in place of the missing payload.
    pub fn tag(&self) -> ErrorTag {
        match self {
            RequestError::NoActiveTab(e) => e.tag(),
            RequestError::Injection(e) => e.tag(),
            RequestError::Channel(e) => e.tag(),
            RequestError::Host(_) => ErrorTag::ContentError,
        }
    }

    /// The restricted URL, when injection was refused by policy.
    pub fn restricted_url(&self) -> Option<&str> {
        match self {
            RequestError::Injection(InjectionError::Restricted { url }) => Some(url),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orla_protocols::TabId;

    #[test]
    fn test_tags() {
        assert_eq!(
            RequestError::from(NoActiveTabError).tag(),
            ErrorTag::NoActiveTab
        );
        assert_eq!(
            RequestError::from(ChannelError::NoReceiver).tag(),
            ErrorTag::ContentError
        );
        assert_eq!(
            RequestError::from(HostError::Query("gone".to_string())).tag(),
            ErrorTag::ContentError
        );
        assert_eq!(
            RequestError::from(InjectionError::TabClosed(TabId(1))).tag(),
            ErrorTag::ContentError
        );
    }

    #[test]
    fn test_restricted_url() {
        let err = RequestError::from(InjectionError::Restricted {
            url: "chrome://extensions".to_string(),
        });
        assert_eq!(err.tag(), ErrorTag::RestrictedPage);
        assert_eq!(err.restricted_url(), Some("chrome://extensions"));
        assert_eq!(RequestError::from(ChannelError::Closed).restricted_url(), None);
    }

    #[test]
    fn test_display_is_transparent() {
        let err = RequestError::from(NoActiveTabError);
        assert_eq!(err.to_string(), NoActiveTabError.to_string());
    }
}

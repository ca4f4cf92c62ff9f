//! Page state produced by the content-script runtime.
//!
//! None of these types carry identity of their own: each value is a snapshot
//! of exactly one tab's document at the moment it was read.

use serde::{Deserialize, Serialize};

/// Error tag carried in reply payloads instead of a thrown failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorTag {
    /// No active tab in the focused window.
    NoActiveTab,
    /// The content runtime did not answer.
    ContentError,
    /// The document may not be scripted or read.
    RestrictedPage,
}

impl ErrorTag {
    /// Wire name of the tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorTag::NoActiveTab => "no_active_tab",
            ErrorTag::ContentError => "content_error",
            ErrorTag::RestrictedPage => "restricted_page",
        }
    }
}

impl std::fmt::Display for ErrorTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Page metadata read from the live document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub title: String,
    pub url: String,
    /// Icon link href, empty when the document declares none.
    pub favicon: String,
}

impl PageInfo {
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        favicon: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            favicon: favicon.into(),
        }
    }
}

/// Page-info reply: the metadata, or an empty snapshot tagged with an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfoReply {
    #[serde(flatten)]
    pub info: PageInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorTag>,
}

impl PageInfoReply {
    pub fn ok(info: PageInfo) -> Self {
        Self { info, error: None }
    }

    /// Empty metadata tagged with `tag`.
    pub fn failed(tag: ErrorTag) -> Self {
        Self {
            info: PageInfo::default(),
            error: Some(tag),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

impl From<PageInfo> for PageInfoReply {
    fn from(info: PageInfo) -> Self {
        Self::ok(info)
    }
}

/// Full visible text of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageText {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorTag>,
}

impl PageText {
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            error: None,
        }
    }

    /// Empty text tagged with `tag`.
    pub fn failed(tag: ErrorTag) -> Self {
        Self {
            text: String::new(),
            error: Some(tag),
        }
    }
}

/// `{success}` acknowledgement for sidebar commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessReply {
    pub success: bool,
}

/// Metadata pushed into the sidebar iframe once it has loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub favicon: String,
    /// Host part of the page URL, empty when it has none.
    pub domain: String,
    pub title: String,
    pub url: String,
}

impl PageMeta {
    /// Derive the window-channel metadata from a page-info snapshot.
    pub fn from_page_info(info: &PageInfo) -> Self {
        let domain = url::Url::parse(&info.url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
            .unwrap_or_default();
        Self {
            favicon: info.favicon.clone(),
            domain,
            title: info.title.clone(),
            url: info.url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_tag_wire_names() {
        assert_eq!(serde_json::to_value(ErrorTag::NoActiveTab).unwrap(), "no_active_tab");
        assert_eq!(serde_json::to_value(ErrorTag::ContentError).unwrap(), "content_error");
        assert_eq!(
            serde_json::to_value(ErrorTag::RestrictedPage).unwrap(),
            "restricted_page"
        );
        assert_eq!(ErrorTag::RestrictedPage.to_string(), "restricted_page");
    }

    #[test]
    fn test_page_info_reply_flattens() {
        let reply = PageInfoReply::ok(PageInfo::new("Example", "https://example.com", ""));
        assert_eq!(
            serde_json::to_value(&reply).unwrap(),
            json!({"title": "Example", "url": "https://example.com", "favicon": ""})
        );
    }

    #[test]
    fn test_page_info_reply_failed() {
        let reply = PageInfoReply::failed(ErrorTag::NoActiveTab);
        assert!(!reply.is_ok());
        assert_eq!(
            serde_json::to_value(&reply).unwrap(),
            json!({"title": "", "url": "", "favicon": "", "error": "no_active_tab"})
        );
    }

    #[test]
    fn test_page_text_failed() {
        let text = PageText::failed(ErrorTag::RestrictedPage);
        assert_eq!(
            serde_json::to_value(&text).unwrap(),
            json!({"text": "", "error": "restricted_page"})
        );
    }

    #[test]
    fn test_page_meta_domain() {
        let info = PageInfo::new("Docs", "https://docs.rs/tokio/latest", "/favicon.ico");
        let meta = PageMeta::from_page_info(&info);
        assert_eq!(meta.domain, "docs.rs");
        assert_eq!(meta.favicon, "/favicon.ico");
    }

    #[test]
    fn test_page_meta_domain_without_host() {
        let info = PageInfo::new("Blank", "about:blank", "");
        assert_eq!(PageMeta::from_page_info(&info).domain, "");
    }
}

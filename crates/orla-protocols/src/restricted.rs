//! Restricted-page policy.
//!
//! Browser-internal, extension, informational, source-view and local file
//! documents refuse script injection and content access. Requests aimed at
//! them short-circuit before any DOM work is attempted.

use url::Url;

/// Schemes that can never be scripted.
pub const DEFAULT_RESTRICTED_SCHEMES: &[&str] = &[
    "chrome",
    "chrome-extension",
    "edge",
    "about",
    "view-source",
    "file",
    "moz-extension",
    "devtools",
];

/// Hosts the browser protects even over https.
pub const DEFAULT_RESTRICTED_HOSTS: &[&str] = &["chromewebstore.google.com", "chrome.google.com"];

/// Decides whether a document URL is off limits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestrictedUrlPolicy {
    schemes: Vec<String>,
    hosts: Vec<String>,
}

impl Default for RestrictedUrlPolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_RESTRICTED_SCHEMES.iter().copied(),
            DEFAULT_RESTRICTED_HOSTS.iter().copied(),
        )
    }
}

impl RestrictedUrlPolicy {
    pub fn new<S, H>(schemes: S, hosts: H) -> Self
    where
        S: IntoIterator,
        S::Item: AsRef<str>,
        H: IntoIterator,
        H::Item: AsRef<str>,
    {
        Self {
            schemes: schemes
                .into_iter()
                .map(|s| s.as_ref().trim_end_matches(':').to_ascii_lowercase())
                .collect(),
            hosts: hosts
                .into_iter()
                .map(|h| h.as_ref().to_ascii_lowercase())
                .collect(),
        }
    }

    /// Whether `url` must not be scripted. Unparseable URLs are restricted.
    pub fn is_restricted(&self, url: &str) -> bool {
        let Ok(parsed) = Url::parse(url.trim()) else {
            return true;
        };
        if self.schemes.iter().any(|s| s == parsed.scheme()) {
            return true;
        }
        match parsed.host_str() {
            Some(host) => self.hosts.iter().any(|h| h == host),
            None => false,
        }
    }

    pub fn schemes(&self) -> &[String] {
        &self.schemes
    }

    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }
}

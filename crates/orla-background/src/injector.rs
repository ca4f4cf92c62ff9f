//! Content injector.
//!
//! Makes sure the content runtime is resident in a tab before anything is
//! forwarded to it. Restricted documents are refused up front, a live runtime
//! is detected with a `PING_CONTENT_SCRIPT` probe, and only a silent tab gets
//! the content script injected.

use std::sync::Arc;

use orla_protocols::{
    BrowserServices, HostError, InjectionError, Message, RestrictedUrlPolicy, ScriptInjector,
    TabId, TabMessenger, TabQuery,
};
use tracing::{debug, info};

/// How the runtime came to be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Injection {
    /// The probe was answered; nothing was injected.
    AlreadyPresent,
    /// The content script was injected.
    Injected,
}

pub struct ContentInjector {
    tabs: Arc<dyn TabQuery>,
    scripting: Arc<dyn ScriptInjector>,
    messaging: Arc<dyn TabMessenger>,
    policy: RestrictedUrlPolicy,
    resource: String,
}

impl ContentInjector {
    pub fn new(
        services: &BrowserServices,
        policy: RestrictedUrlPolicy,
        resource: impl Into<String>,
    ) -> Self {
        Self {
            tabs: services.tabs.clone(),
            scripting: services.scripting.clone(),
            messaging: services.messaging.clone(),
            policy,
            resource: resource.into(),
        }
    }

    pub fn policy(&self) -> &RestrictedUrlPolicy {
        &self.policy
    }

    /// Ensure the content runtime is running in `tab_id`.
    ///
    /// Re-injection into a tab that already runs the script is harmless, but
    /// the probe avoids it in the common case.
    pub async fn ensure_injected(&self, tab_id: TabId) -> Result<Injection, InjectionError> {
        let tab = self.tabs.get(tab_id).await.map_err(|e| match e {
            HostError::TabNotFound(id) => InjectionError::TabClosed(id),
            other => InjectionError::Failed(other.to_string()),
        })?;

        if self.policy.is_restricted(&tab.url) {
            return Err(InjectionError::Restricted { url: tab.url });
        }

        match self
            .messaging
            .send_to_tab(tab_id, Message::PingContentScript)
            .await
        {
            Ok(reply) if reply.is_alive() => {
                debug!("Content script already present in tab {}", tab_id);
                return Ok(Injection::AlreadyPresent);
            }
            Ok(reply) => debug!("Unexpected probe reply from tab {}: {:?}", tab_id, reply),
            Err(e) => debug!("Probe to tab {} failed: {}", tab_id, e),
        }

        self.scripting.inject(tab_id, &self.resource).await?;
        info!("Injected {} into tab {}", self.resource, tab_id);
        Ok(Injection::Injected)
    }
}

#[cfg(test)]
#[path = "injector_tests.rs"]
mod tests;

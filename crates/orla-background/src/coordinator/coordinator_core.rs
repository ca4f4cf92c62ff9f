//! Coordinator construction and shared plumbing.

use std::sync::Arc;

use orla_config::Config;
use orla_protocols::{
    BrowserServices, ChannelError, Message, NoActiveTabError, Reply, RestrictedUrlPolicy,
    TabContext, TabId,
};
use tracing::{debug, warn};

use super::transaction::{Phase, Transaction};
use crate::error::RequestError;
use crate::injector::ContentInjector;

pub(super) struct CoordinatorInner {
    pub(super) services: BrowserServices,
    pub(super) injector: ContentInjector,
    pub(super) restricted_message: String,
    pub(super) storage_key: String,
}

/// Stateless router. Cloning shares the capabilities, never request state.
#[derive(Clone)]
pub struct Coordinator {
    pub(super) inner: Arc<CoordinatorInner>,
}

impl Coordinator {
    pub fn new(services: BrowserServices, config: &Config) -> Self {
        let policy = RestrictedUrlPolicy::new(&config.restricted.schemes, &config.restricted.hosts);
        let injector =
            ContentInjector::new(&services, policy, config.background.content_script.clone());
        Self {
            inner: Arc::new(CoordinatorInner {
                services,
                injector,
                restricted_message: config.background.restricted_message.clone(),
                storage_key: config.content.storage_key.clone(),
            }),
        }
    }

    pub fn injector(&self) -> &ContentInjector {
        &self.inner.injector
    }

    /// Best-effort extension-wide notification.
    ///
    /// Nobody may be listening (the UI is often closed), so a failure is
    /// logged and returned for the caller to ignore. It is never retried.
    pub async fn notify_ui(&self, message: Message) -> Result<(), ChannelError> {
        let kind = message.kind();
        match self.inner.services.broadcast.broadcast(message).await {
            Ok(()) => {
                debug!("Broadcast {}", kind);
                Ok(())
            }
            Err(e) => {
                warn!("Broadcast {} not delivered: {}", kind, e);
                Err(e)
            }
        }
    }

    /// Resolve the active tab of the focused window, fresh on every call.
    pub(super) async fn resolve_active_tab(
        &self,
        tx: &mut Transaction,
    ) -> Result<TabContext, RequestError> {
        tx.advance(Phase::ResolvingTab);
        self.inner
            .services
            .tabs
            .active_tab()
            .await?
            .ok_or(RequestError::NoActiveTab(NoActiveTabError))
    }

    /// Inject if needed, then forward `message` to the tab and wait for its
    /// reply.
    pub(super) async fn inject_and_forward(
        &self,
        tx: &mut Transaction,
        tab_id: TabId,
        message: Message,
    ) -> Result<Reply, RequestError> {
        tx.advance(Phase::Injecting);
        let injection = self.inner.injector.ensure_injected(tab_id).await?;
        debug!("Tab {} runtime: {:?}", tab_id, injection);

        tx.advance(Phase::Forwarding);
        let reply = self
            .inner
            .services
            .messaging
            .send_to_tab(tab_id, message)
            .await?;
        Ok(reply)
    }

    /// Resolve, inject and forward in one go.
    pub(super) async fn forward_to_active(
        &self,
        tx: &mut Transaction,
        message: Message,
    ) -> Result<Reply, RequestError> {
        let tab = self.resolve_active_tab(tx).await?;
        self.inject_and_forward(tx, tab.id, message).await
    }

    /// Close out `tx` according to `result`.
    pub(super) fn finish<T>(tx: &mut Transaction, result: &Result<T, RequestError>) {
        match result {
            Ok(_) => tx.complete(),
            Err(e) => tx.fail(e),
        }
    }
}

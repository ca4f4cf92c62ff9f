//! Browser-event flows: icon click, navigation, tab activation, install.

use orla_protocols::{HostError, Message, PageInfoReply, StorageError, TabContext, TabId};
use serde_json::Value;
use tracing::{Instrument, debug, info, warn};

use super::coordinator_core::Coordinator;
use super::transaction::{Phase, Transaction};
use crate::error::RequestError;

impl Coordinator {
    /// Action-icon click: open the side panel for `tab`, then push its page
    /// info to the UI.
    pub async fn handle_icon_click(&self, tab: TabContext) -> Result<(), RequestError> {
        let mut tx = Transaction::begin("ACTION_CLICKED");
        let span = tx.span().clone();
        async {
            // Must run first, while the click's user gesture is still valid.
            if let Err(e) = self.inner.services.side_panel.open(tab.id).await {
                warn!("Could not open side panel for tab {}: {}", tab.id, e);
            }
            self.push_page_info(&mut tx, tab.id).await
        }
        .instrument(span)
        .await
    }

    /// `tabs.onUpdated`: only a completed load of the active tab matters.
    pub async fn handle_tab_updated(&self, tab: TabContext) -> Result<(), RequestError> {
        if !tab.is_complete() || !tab.active {
            debug!("Ignoring update of tab {} ({:?})", tab.id, tab.status);
            return Ok(());
        }
        self.handle_tab_navigation_complete(tab.id).await
    }

    /// The active tab finished loading: refresh the UI's page info.
    pub async fn handle_tab_navigation_complete(&self, tab_id: TabId) -> Result<(), RequestError> {
        let mut tx = Transaction::begin("TAB_NAVIGATION_COMPLETE");
        let span = tx.span().clone();
        async {
            let tab = self.refresh_tab(&mut tx, tab_id).await?;
            if !tab.active {
                debug!("Tab {} is no longer active", tab_id);
                tx.complete();
                return Ok(());
            }
            self.push_page_info(&mut tx, tab.id).await
        }
        .instrument(span)
        .await
    }

    /// The user switched tabs: push the new tab's page info.
    pub async fn handle_tab_activated(&self, tab_id: TabId) -> Result<(), RequestError> {
        let mut tx = Transaction::begin("TAB_ACTIVATED");
        let span = tx.span().clone();
        async {
            let tab = self.refresh_tab(&mut tx, tab_id).await?;
            self.push_page_info(&mut tx, tab.id).await
        }
        .instrument(span)
        .await
    }

    /// Seed the visibility preference on install. An existing value wins.
    pub async fn handle_installed(&self) -> Result<(), StorageError> {
        let storage = &self.inner.services.storage;
        let key = &self.inner.storage_key;
        if storage.get(key).await?.is_some() {
            debug!("Keeping existing {} preference", key);
            return Ok(());
        }
        storage.set(key, Value::Bool(false)).await?;
        info!("Seeded {} = false", key);
        Ok(())
    }

    /// Current snapshot of a tab named by an event.
    async fn refresh_tab(
        &self,
        tx: &mut Transaction,
        tab_id: TabId,
    ) -> Result<TabContext, RequestError> {
        tx.advance(Phase::ResolvingTab);
        match self.inner.services.tabs.get(tab_id).await {
            Ok(tab) => Ok(tab),
            Err(e) => {
                let err = RequestError::from(e);
                if matches!(err, RequestError::Host(HostError::TabNotFound(_))) {
                    debug!("Tab {} closed before it could be refreshed", tab_id);
                }
                tx.fail(&err);
                Err(err)
            }
        }
    }

    /// Inject, fetch page info and broadcast it. A restricted tab is
    /// reported with `RESTRICTED_PAGE_ERROR` and receives no message.
    async fn push_page_info(&self, tx: &mut Transaction, tab_id: TabId) -> Result<(), RequestError> {
        let result = self
            .inject_and_forward(tx, tab_id, Message::RequestPageInfoFromContentScript)
            .await
            .and_then(|reply| reply.into_page_info().map_err(RequestError::from));
        Self::finish(tx, &result);

        match result {
            Ok(data) => {
                let _ = self.notify_ui(Message::PageInfoUpdate { data }).await;
                Ok(())
            }
            Err(e) => {
                let notice = match e.restricted_url() {
                    Some(url) => Message::RestrictedPageError {
                        message: self.inner.restricted_message.clone(),
                        url: url.to_string(),
                    },
                    None => Message::PageInfoUpdate {
                        data: PageInfoReply::failed(e.tag()),
                    },
                };
                let _ = self.notify_ui(notice).await;
                Err(e)
            }
        }
    }
}

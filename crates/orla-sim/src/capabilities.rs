//! Capability trait implementations for [`SimBrowser`].

use std::sync::Arc;

use async_trait::async_trait;
use orla_content::{ContentRuntime, DomEventKind, HostDocument, InitOutcome};
use orla_protocols::{
    Broadcaster, ChannelError, HostError, InjectionError, Message, MessageHandler, MessageSender,
    Reply, ScriptInjector, SidePanel, TabContext, TabId, TabMessenger, TabQuery,
};
use tracing::{debug, info};

use crate::browser::SimBrowser;

#[async_trait]
impl TabQuery for SimBrowser {
    async fn active_tab(&self) -> Result<Option<TabContext>, HostError> {
        let state = self.state.lock();
        let Some(window) = state.focused_window else {
            return Ok(None);
        };
        Ok(state
            .tabs
            .values()
            .find(|t| t.context.window_id == window && t.context.active)
            .map(|t| {
                let mut context = t.context.clone();
                context.focused = true;
                context
            }))
    }

    async fn get(&self, tab_id: TabId) -> Result<TabContext, HostError> {
        let state = self.state.lock();
        let tab = state.tabs.get(&tab_id).ok_or(HostError::TabNotFound(tab_id))?;
        let mut context = tab.context.clone();
        context.focused = state.focused_window == Some(context.window_id);
        Ok(context)
    }
}

#[async_trait]
impl ScriptInjector for SimBrowser {
    async fn inject(&self, tab_id: TabId, resource: &str) -> Result<(), InjectionError> {
        if resource != self.config.background.content_script {
            return Err(InjectionError::Failed(format!("unknown resource {}", resource)));
        }

        let document = {
            let state = self.state.lock();
            let tab = state
                .tabs
                .get(&tab_id)
                .ok_or(InjectionError::TabClosed(tab_id))?;
            // The browser itself refuses to script these documents.
            if self.policy.is_restricted(&tab.context.url) {
                return Err(InjectionError::Restricted {
                    url: tab.context.url.clone(),
                });
            }
            tab.document.clone()
        };

        let frame_id = self.config.content.frame_id.as_str();
        let had_frame = document.element_exists(frame_id);
        let runtime = ContentRuntime::new(
            document.clone(),
            self.storage.clone(),
            self.config.content.clone(),
            self.policy.clone(),
        );
        let outcome = runtime
            .initialize()
            .await
            .map_err(|e| InjectionError::Failed(e.to_string()))?;

        {
            let mut state = self.state.lock();
            let tab = state
                .tabs
                .get_mut(&tab_id)
                .ok_or(InjectionError::TabClosed(tab_id))?;
            if !Arc::ptr_eq(&tab.document, &document) {
                return Err(InjectionError::Failed(
                    "tab navigated during injection".to_string(),
                ));
            }
            tab.runtime = Some(runtime);
            state.injections.push(tab_id);
        }
        info!("Content script running in tab {} ({:?})", tab_id, outcome);

        // A freshly appended frame loads its document.
        if outcome == InitOutcome::Initialized && !had_frame {
            document.dispatch(frame_id, DomEventKind::Load);
        }
        Ok(())
    }
}

#[async_trait]
impl TabMessenger for SimBrowser {
    async fn send_to_tab(&self, tab_id: TabId, message: Message) -> Result<Reply, ChannelError> {
        let runtime = {
            let mut state = self.state.lock();
            state.sent.push((tab_id, message.clone()));
            state
                .tabs
                .get(&tab_id)
                .and_then(|t| t.runtime.clone())
                .ok_or(ChannelError::NoReceiver)?
        };

        let kind = message.kind();
        match runtime.handle(message, MessageSender::background()).await {
            Some(reply) => Ok(reply),
            None => {
                debug!("Tab {} left {} unanswered", tab_id, kind);
                Err(ChannelError::Closed)
            }
        }
    }
}

#[async_trait]
impl SidePanel for SimBrowser {
    async fn open(&self, tab_id: TabId) -> Result<(), HostError> {
        let mut state = self.state.lock();
        if !state.tabs.contains_key(&tab_id) {
            return Err(HostError::TabNotFound(tab_id));
        }
        state.panels.push(tab_id);
        Ok(())
    }
}

#[async_trait]
impl Broadcaster for SimBrowser {
    async fn broadcast(&self, message: Message) -> Result<(), ChannelError> {
        let mut state = self.state.lock();
        if !state.ui_open {
            return Err(ChannelError::NoReceiver);
        }
        state.ui_inbox.push(message);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::PageSpec;
    use orla_config::Config;
    use orla_protocols::WindowId;

    #[tokio::test]
    async fn test_active_tab_follows_focus() {
        let browser = SimBrowser::new(Config::default());
        let first = browser.open_tab(PageSpec::new("https://a.test", "A"));
        let second = browser.open_tab_in(WindowId(2), PageSpec::new("https://b.test", "B"));

        assert_eq!(browser.active_tab().await.unwrap().unwrap().id, second.id);
        browser.activate(first.id);
        assert_eq!(browser.active_tab().await.unwrap().unwrap().id, first.id);
        browser.blur_all_windows();
        assert!(browser.active_tab().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_reports_focus() {
        let browser = SimBrowser::new(Config::default());
        let first = browser.open_tab(PageSpec::new("https://a.test", "A"));
        browser.open_tab_in(WindowId(2), PageSpec::new("https://b.test", "B"));

        assert!(!browser.get(first.id).await.unwrap().focused);
        assert_eq!(
            browser.get(TabId(42)).await.unwrap_err(),
            HostError::TabNotFound(TabId(42))
        );
    }

    #[tokio::test]
    async fn test_inject_starts_runtime_and_loads_frame() {
        let browser = SimBrowser::new(Config::default());
        let tab = browser.open_tab(PageSpec::new("https://example.com/", "Example"));

        browser.inject(tab.id, "content.js").await.unwrap();
        assert!(browser.runtime(tab.id).is_some());
        assert_eq!(browser.document(tab.id).unwrap().frame_count(), 1);
        assert_eq!(browser.sidebar_meta(tab.id).unwrap().domain, "example.com");
    }

    #[tokio::test]
    async fn test_inject_refuses_restricted_and_unknown() {
        let browser = SimBrowser::new(Config::default());
        let tab = browser.open_tab(PageSpec::new("chrome://extensions", "Extensions"));

        assert!(browser.inject(tab.id, "content.js").await.unwrap_err().is_restricted());
        assert!(matches!(
            browser.inject(tab.id, "other.js").await.unwrap_err(),
            InjectionError::Failed(_)
        ));
        assert_eq!(
            browser.inject(TabId(7), "content.js").await.unwrap_err(),
            InjectionError::TabClosed(TabId(7))
        );
        assert!(browser.injections().is_empty());
    }

    #[tokio::test]
    async fn test_send_without_runtime() {
        let browser = SimBrowser::new(Config::default());
        let tab = browser.open_tab(PageSpec::new("https://a.test", "A"));

        let err = browser
            .send_to_tab(tab.id, Message::PingContentScript)
            .await
            .unwrap_err();
        assert_eq!(err, ChannelError::NoReceiver);
        assert_eq!(browser.messages_to(tab.id), vec![Message::PingContentScript]);
    }

    #[tokio::test]
    async fn test_navigation_drops_runtime() {
        let browser = SimBrowser::new(Config::default());
        let tab = browser.open_tab(PageSpec::new("https://a.test", "A"));
        browser.inject(tab.id, "content.js").await.unwrap();

        browser.navigate(tab.id, PageSpec::new("https://b.test", "B"));
        let err = browser
            .send_to_tab(tab.id, Message::PingContentScript)
            .await
            .unwrap_err();
        assert_eq!(err, ChannelError::NoReceiver);
    }

    #[tokio::test]
    async fn test_broadcast_needs_open_ui() {
        let browser = SimBrowser::new(Config::default());
        browser.set_ui_open(false);
        assert!(browser.broadcast(Message::ToggleSidebar).await.is_err());
        browser.set_ui_open(true);
        browser.broadcast(Message::ToggleSidebar).await.unwrap();
        assert_eq!(browser.ui_messages(), vec![Message::ToggleSidebar]);
    }
}

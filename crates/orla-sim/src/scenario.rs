//! Canned end-to-end runs used by the CLI.

use orla_background::Coordinator;
use orla_config::Config;
use orla_protocols::{Message, PageMeta, TabId};
use serde::Serialize;
use tracing::info;

use crate::browser::{PageSpec, SimBrowser};

/// What happened during a simulated run.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub tab: TabId,
    /// Broadcasts delivered to the sidebar UI, in order.
    pub ui_messages: Vec<Message>,
    /// Metadata pushed into the in-page sidebar frame.
    pub sidebar_meta: Option<PageMeta>,
    pub injected: bool,
    pub side_panel_opened: bool,
    /// Extension-bus messages sent to the tab, probes included.
    pub tab_messages: Vec<Message>,
}

/// Open `page` in a fresh browser and click the action icon on it.
pub async fn simulate_icon_click(config: Config, page: PageSpec) -> SimulationReport {
    let browser = SimBrowser::new(config);
    let coordinator = Coordinator::new(browser.services(), browser.config());
    let _ = coordinator.handle_installed().await;

    let tab = browser.open_tab(page);
    if let Err(e) = coordinator.handle_icon_click(tab.clone()).await {
        info!("Icon click on {} ended with {}", tab.url, e);
    }

    SimulationReport {
        tab: tab.id,
        ui_messages: browser.ui_messages(),
        sidebar_meta: browser.sidebar_meta(tab.id),
        injected: browser.injections().contains(&tab.id),
        side_panel_opened: browser.panel_opens().contains(&tab.id),
        tab_messages: browser.messages_to(tab.id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_report_for_regular_page() {
        let report = simulate_icon_click(
            Config::default(),
            PageSpec::new("https://example.com", "Example"),
        )
        .await;
        assert!(report.injected);
        assert!(report.side_panel_opened);
        assert_eq!(report.ui_messages.len(), 1);
        assert!(report.sidebar_meta.is_some());

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["ui_messages"][0]["type"], "PAGE_INFO_UPDATE");
    }

    #[tokio::test]
    async fn test_report_for_restricted_page() {
        let report = simulate_icon_click(
            Config::default(),
            PageSpec::new("file:///etc/hosts", "hosts"),
        )
        .await;
        assert!(!report.injected);
        assert!(report.tab_messages.is_empty());
        assert!(matches!(
            report.ui_messages.as_slice(),
            [Message::RestrictedPageError { .. }]
        ));
    }
}

//! Simulated browser: windows, tabs and their documents.

use std::collections::BTreeMap;
use std::sync::Arc;

use orla_config::Config;
use orla_content::{ContentRuntime, MemoryDocument, SidebarBridge};
use orla_protocols::{
    BrowserServices, Message, PageMeta, RestrictedUrlPolicy, TabContext, TabId, TabStatus,
    WindowId,
};
use parking_lot::Mutex;
use tracing::debug;

use crate::store::MemoryStore;

/// Content of a page loaded into a tab.
#[derive(Debug, Clone, Default)]
pub struct PageSpec {
    pub url: String,
    pub title: String,
    pub favicon: Option<String>,
    pub text: String,
}

impl PageSpec {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_favicon(mut self, href: impl Into<String>) -> Self {
        self.favicon = Some(href.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    fn load(&self) -> MemoryDocument {
        let doc = MemoryDocument::new(&self.url, &self.title).with_text(&self.text);
        match &self.favicon {
            Some(href) => doc.with_icon(href),
            None => doc,
        }
    }
}

pub(crate) struct SimTab {
    pub(crate) context: TabContext,
    pub(crate) document: Arc<MemoryDocument>,
    pub(crate) bridge: Arc<SidebarBridge>,
    pub(crate) runtime: Option<ContentRuntime>,
}

#[derive(Default)]
pub(crate) struct BrowserState {
    pub(crate) tabs: BTreeMap<TabId, SimTab>,
    pub(crate) focused_window: Option<WindowId>,
    pub(crate) next_tab: i64,
    pub(crate) injections: Vec<TabId>,
    pub(crate) sent: Vec<(TabId, Message)>,
    pub(crate) panels: Vec<TabId>,
    pub(crate) ui_open: bool,
    pub(crate) ui_inbox: Vec<Message>,
}

/// In-memory browser session.
pub struct SimBrowser {
    pub(crate) state: Mutex<BrowserState>,
    pub(crate) storage: Arc<MemoryStore>,
    pub(crate) config: Config,
    pub(crate) policy: RestrictedUrlPolicy,
}

impl SimBrowser {
    pub fn new(config: Config) -> Arc<Self> {
        let policy = RestrictedUrlPolicy::new(&config.restricted.schemes, &config.restricted.hosts);
        Arc::new(Self {
            state: Mutex::new(BrowserState {
                next_tab: 1,
                ui_open: true,
                ..Default::default()
            }),
            storage: Arc::new(MemoryStore::new()),
            config,
            policy,
        })
    }

    /// Every capability backed by this browser.
    pub fn services(self: &Arc<Self>) -> BrowserServices {
        BrowserServices {
            tabs: self.clone(),
            scripting: self.clone(),
            messaging: self.clone(),
            side_panel: self.clone(),
            broadcast: self.clone(),
            storage: self.storage.clone(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn storage(&self) -> Arc<MemoryStore> {
        self.storage.clone()
    }

    /// Open `page` in a new active tab of window 1 and focus that window.
    pub fn open_tab(&self, page: PageSpec) -> TabContext {
        self.open_tab_in(WindowId(1), page)
    }

    pub fn open_tab_in(&self, window: WindowId, page: PageSpec) -> TabContext {
        let mut state = self.state.lock();
        let id = TabId(state.next_tab);
        state.next_tab += 1;

        for tab in state.tabs.values_mut() {
            if tab.context.window_id == window {
                tab.context.active = false;
            }
        }

        let context = TabContext::new(id.0, page.url.clone()).in_window(window.0);
        let (document, bridge) = self.load_document(&page);
        state.tabs.insert(
            id,
            SimTab {
                context: context.clone(),
                document,
                bridge,
                runtime: None,
            },
        );
        state.focused_window = Some(window);
        debug!("Opened tab {} at {}", id, page.url);
        context
    }

    /// Load `page` into an existing tab. The old document and its runtime
    /// are discarded.
    pub fn navigate(&self, tab_id: TabId, page: PageSpec) -> Option<TabContext> {
        let (document, bridge) = self.load_document(&page);
        let mut state = self.state.lock();
        let tab = state.tabs.get_mut(&tab_id)?;
        tab.context.url = page.url.clone();
        tab.context.status = TabStatus::Complete;
        tab.document = document;
        tab.bridge = bridge;
        tab.runtime = None;
        debug!("Tab {} navigated to {}", tab_id, page.url);
        Some(tab.context.clone())
    }

    /// Make `tab_id` the active tab of its window and focus the window.
    pub fn activate(&self, tab_id: TabId) -> Option<TabContext> {
        let mut state = self.state.lock();
        let window = state.tabs.get(&tab_id)?.context.window_id;
        for tab in state.tabs.values_mut() {
            if tab.context.window_id == window {
                tab.context.active = tab.context.id == tab_id;
            }
        }
        state.focused_window = Some(window);
        state.tabs.get(&tab_id).map(|t| t.context.clone())
    }

    pub fn close_tab(&self, tab_id: TabId) {
        self.state.lock().tabs.remove(&tab_id);
    }

    /// No browser window has focus.
    pub fn blur_all_windows(&self) {
        self.state.lock().focused_window = None;
    }

    /// Whether a sidebar UI is listening for broadcasts.
    pub fn set_ui_open(&self, open: bool) {
        self.state.lock().ui_open = open;
    }

    /// Broadcasts the UI received, oldest first.
    pub fn ui_messages(&self) -> Vec<Message> {
        self.state.lock().ui_inbox.clone()
    }

    pub fn document(&self, tab_id: TabId) -> Option<Arc<MemoryDocument>> {
        self.state.lock().tabs.get(&tab_id).map(|t| t.document.clone())
    }

    pub fn runtime(&self, tab_id: TabId) -> Option<ContentRuntime> {
        self.state.lock().tabs.get(&tab_id)?.runtime.clone()
    }

    /// Latest `PAGE_META` received by the tab's sidebar frame.
    pub fn sidebar_meta(&self, tab_id: TabId) -> Option<PageMeta> {
        self.state.lock().tabs.get(&tab_id)?.bridge.latest()
    }

    pub fn injections(&self) -> Vec<TabId> {
        self.state.lock().injections.clone()
    }

    pub fn panel_opens(&self) -> Vec<TabId> {
        self.state.lock().panels.clone()
    }

    /// Extension-bus messages sent to `tab_id`, probes included.
    pub fn messages_to(&self, tab_id: TabId) -> Vec<Message> {
        self.state
            .lock()
            .sent
            .iter()
            .filter(|(id, _)| *id == tab_id)
            .map(|(_, m)| m.clone())
            .collect()
    }

    fn load_document(&self, page: &PageSpec) -> (Arc<MemoryDocument>, Arc<SidebarBridge>) {
        let document = Arc::new(page.load());
        let bridge = Arc::new(SidebarBridge::new());
        document.attach_frame_window(self.config.content.frame_id.clone(), bridge.clone());
        (document, bridge)
    }
}

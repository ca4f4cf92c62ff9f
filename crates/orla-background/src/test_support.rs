//! Hand-written browser mock shared by the unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use orla_protocols::{
    Broadcaster, BrowserServices, ChannelError, HostError, InjectionError, KeyValueStore, Message,
    PageInfo, PageText, Reply, ScriptInjector, SidePanel, StorageError, TabContext, TabId,
    TabMessenger, TabQuery,
};
use parking_lot::Mutex;
use serde_json::Value;

#[derive(Default)]
pub struct MockBrowser {
    pub tabs: Mutex<Vec<TabContext>>,
    pub active: Mutex<Option<TabId>>,
    pub titles: Mutex<HashMap<TabId, String>>,
    /// Tabs whose content runtime answers messages.
    pub resident: Mutex<HashSet<TabId>>,
    pub injections: Mutex<Vec<TabId>>,
    pub sent: Mutex<Vec<(TabId, Message)>>,
    pub broadcasts: Mutex<Vec<Message>>,
    pub panels: Mutex<Vec<TabId>>,
    pub storage: Mutex<HashMap<String, Value>>,
    pub fail_broadcast: AtomicBool,
    pub fail_panel: AtomicBool,
    /// Runtime receives messages but never answers.
    pub drop_replies: AtomicBool,
}

impl MockBrowser {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn services(self: &Arc<Self>) -> BrowserServices {
        BrowserServices {
            tabs: self.clone(),
            scripting: self.clone(),
            messaging: self.clone(),
            side_panel: self.clone(),
            broadcast: self.clone(),
            storage: self.clone(),
        }
    }

    /// Open a tab and make it the active one.
    pub fn open(&self, id: i64, url: &str, title: &str) -> TabContext {
        let tab = TabContext::new(id, url);
        {
            let mut tabs = self.tabs.lock();
            for other in tabs.iter_mut() {
                other.active = false;
            }
            tabs.push(tab.clone());
        }
        self.titles.lock().insert(tab.id, title.to_string());
        *self.active.lock() = Some(tab.id);
        tab
    }

    pub fn activate(&self, id: TabId) {
        for tab in self.tabs.lock().iter_mut() {
            tab.active = tab.id == id;
        }
        *self.active.lock() = Some(id);
    }

    pub fn close_all(&self) {
        self.tabs.lock().clear();
        *self.active.lock() = None;
    }

    pub fn make_resident(&self, id: TabId) {
        self.resident.lock().insert(id);
    }

    pub fn injection_count(&self) -> usize {
        self.injections.lock().len()
    }

    /// Messages other than liveness probes sent to `id`.
    pub fn requests_to(&self, id: TabId) -> Vec<Message> {
        self.sent
            .lock()
            .iter()
            .filter(|(tab, m)| *tab == id && *m != Message::PingContentScript)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn messages_to(&self, id: TabId) -> usize {
        self.sent.lock().iter().filter(|(tab, _)| *tab == id).count()
    }

    pub fn broadcasts(&self) -> Vec<Message> {
        self.broadcasts.lock().clone()
    }

    fn find(&self, id: TabId) -> Option<TabContext> {
        self.tabs.lock().iter().find(|t| t.id == id).cloned()
    }
}

#[async_trait]
impl TabQuery for MockBrowser {
    async fn active_tab(&self) -> Result<Option<TabContext>, HostError> {
        let active = *self.active.lock();
        Ok(active.and_then(|id| self.find(id)))
    }

    async fn get(&self, tab_id: TabId) -> Result<TabContext, HostError> {
        self.find(tab_id).ok_or(HostError::TabNotFound(tab_id))
    }
}

#[async_trait]
impl ScriptInjector for MockBrowser {
    async fn inject(&self, tab_id: TabId, _resource: &str) -> Result<(), InjectionError> {
        if self.find(tab_id).is_none() {
            return Err(InjectionError::TabClosed(tab_id));
        }
        self.injections.lock().push(tab_id);
        self.resident.lock().insert(tab_id);
        Ok(())
    }
}

#[async_trait]
impl TabMessenger for MockBrowser {
    async fn send_to_tab(&self, tab_id: TabId, message: Message) -> Result<Reply, ChannelError> {
        self.sent.lock().push((tab_id, message.clone()));
        if !self.resident.lock().contains(&tab_id) {
            return Err(ChannelError::NoReceiver);
        }
        if self.drop_replies.load(Ordering::SeqCst) {
            return Err(ChannelError::Closed);
        }
        let tab = self.find(tab_id).ok_or(ChannelError::NoReceiver)?;
        let title = self.titles.lock().get(&tab_id).cloned().unwrap_or_default();
        match message {
            Message::PingContentScript => Ok(Reply::alive()),
            Message::RequestPageInfoFromContentScript => {
                Ok(Reply::PageInfo(PageInfo::new(title, tab.url, "").into()))
            }
            Message::GetPageText => Ok(Reply::PageText(PageText::ok(format!("text of {}", title)))),
            Message::ToggleSidebar | Message::CloseSidebarRequest => Ok(Reply::success(true)),
            _ => Err(ChannelError::Closed),
        }
    }
}

#[async_trait]
impl SidePanel for MockBrowser {
    async fn open(&self, tab_id: TabId) -> Result<(), HostError> {
        if self.fail_panel.load(Ordering::SeqCst) {
            return Err(HostError::SidePanel("no user gesture".to_string()));
        }
        self.panels.lock().push(tab_id);
        Ok(())
    }
}

#[async_trait]
impl Broadcaster for MockBrowser {
    async fn broadcast(&self, message: Message) -> Result<(), ChannelError> {
        if self.fail_broadcast.load(Ordering::SeqCst) {
            return Err(ChannelError::NoReceiver);
        }
        self.broadcasts.lock().push(message);
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for MockBrowser {
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.storage.lock().get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        self.storage.lock().insert(key.to_string(), value);
        Ok(())
    }
}

//! Browser capabilities consumed by the Orla core.
//!
//! Each trait wraps one extension API surface. The background coordinator
//! receives them bundled in [`BrowserServices`]; the content runtime only
//! needs [`KeyValueStore`].

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{ChannelError, HostError, InjectionError, StorageError};
use crate::message::{Message, Reply};
use crate::tab::{TabContext, TabId};

/// Tab lookup.
#[async_trait]
pub trait TabQuery: Send + Sync {
    /// The active tab of the currently focused window, if any.
    async fn active_tab(&self) -> Result<Option<TabContext>, HostError>;

    /// Current snapshot of a tab.
    async fn get(&self, tab_id: TabId) -> Result<TabContext, HostError>;
}

/// Places a named script resource into a tab's document.
#[async_trait]
pub trait ScriptInjector: Send + Sync {
    async fn inject(&self, tab_id: TabId, resource: &str) -> Result<(), InjectionError>;
}

/// Extension-bus send to the content runtime of one tab.
#[async_trait]
pub trait TabMessenger: Send + Sync {
    /// Send `message` and wait for its reply.
    ///
    /// Fails immediately with [`ChannelError::NoReceiver`] when the tab has no
    /// listener, and with [`ChannelError::Closed`] when the receiver goes away
    /// without answering.
    async fn send_to_tab(&self, tab_id: TabId, message: Message) -> Result<Reply, ChannelError>;
}

/// Browser-chrome side panel surface.
#[async_trait]
pub trait SidePanel: Send + Sync {
    async fn open(&self, tab_id: TabId) -> Result<(), HostError>;
}

/// Extension-wide broadcast to every listening context (the sidebar UI).
#[async_trait]
pub trait Broadcaster: Send + Sync {
    async fn broadcast(&self, message: Message) -> Result<(), ChannelError>;
}

/// Durable per-extension key-value storage.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError>;

    async fn set(&self, key: &str, value: Value) -> Result<(), StorageError>;

    /// Read a boolean, treating an absent key as `None`.
    async fn get_bool(&self, key: &str) -> Result<Option<bool>, StorageError> {
        match self.get(key).await? {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(b)),
            Some(other) => Err(StorageError::InvalidValue {
                key: key.to_string(),
                message: format!("expected boolean, found {}", other),
            }),
        }
    }
}

/// Every capability the background coordinator uses.
#[derive(Clone)]
pub struct BrowserServices {
    pub tabs: Arc<dyn TabQuery>,
    pub scripting: Arc<dyn ScriptInjector>,
    pub messaging: Arc<dyn TabMessenger>,
    pub side_panel: Arc<dyn SidePanel>,
    pub broadcast: Arc<dyn Broadcaster>,
    pub storage: Arc<dyn KeyValueStore>,
}

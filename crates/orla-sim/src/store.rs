//! Durable-storage stand-in.

use std::collections::HashMap;

use async_trait::async_trait;
use orla_protocols::{KeyValueStore, StorageError};
use parking_lot::Mutex;
use serde_json::Value;

/// `chrome.storage.local` held in memory, shared by every context.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value without going through the async API.
    pub fn peek(&self, key: &str) -> Option<Value> {
        self.values.lock().get(key).cloned()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StorageError> {
        Ok(self.peek(key))
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        self.values.lock().insert(key.to_string(), value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_last_write_wins() {
        let store = MemoryStore::new();
        store.set("sidebarOpen", Value::Bool(true)).await.unwrap();
        store.set("sidebarOpen", Value::Bool(false)).await.unwrap();
        assert_eq!(store.get_bool("sidebarOpen").await.unwrap(), Some(false));
        assert_eq!(store.peek("missing"), None);
    }
}

//! In-memory key-value store for tests and demos

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::store::KvStore;

/// A process-local [`KvStore`] backed by a map behind an async lock
#[derive(Default)]
pub struct InMemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot a single raw value, mainly for assertions in tests
    pub async fn raw(&self, key: &str) -> Option<String> {
        self.entries.lock().await.get(key).cloned()
    }
}

#[async_trait]
impl KvStore for InMemoryStore {
    async fn read(&self, keys: &[&str]) -> Option<HashMap<String, String>> {
        let entries = self.entries.lock().await;
        let mut result = HashMap::new();
        for key in keys {
            if let Some(value) = entries.get(*key) {
                result.insert((*key).to_string(), value.clone());
            }
        }
        Some(result)
    }

    async fn write(&self, new_entries: HashMap<String, String>) -> crate::Result<()> {
        let mut entries = self.entries.lock().await;
        entries.extend(new_entries);
        Ok(())
    }
}

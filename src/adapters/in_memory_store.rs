//! Stats stores that never touch the file system.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use crate::{
    Result,
    ports::{StatsRecord, StatsStore},
    types::BoardKey,
};

/// In-memory store for tests.
///
/// Records are kept as serialized JSON so that corrupt entries can be
/// planted with [`Self::insert_raw`]. Clones share the same storage.
///
/// # Examples
///
/// ```
/// use selfplay::adapters::InMemoryStore;
/// use selfplay::engine::StateRegistry;
///
/// let store = InMemoryStore::new();
/// let mut registry = StateRegistry::new(store.clone());
/// let root = registry.initial()?;
/// registry.revise(root, 0.5)?;
/// assert_eq!(store.count(), 1);
/// # Ok::<(), selfplay::Error>(())
/// ```
#[derive(Clone, Default)]
pub struct InMemoryStore {
    storage: Arc<Mutex<HashMap<BoardKey, String>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn storage(&self) -> MutexGuard<'_, HashMap<BoardKey, String>> {
        self.storage.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Number of stored records.
    pub fn count(&self) -> usize {
        self.storage().len()
    }

    pub fn contains(&self, key: &BoardKey) -> bool {
        self.storage().contains_key(key)
    }

    /// Store `text` under `key` without checking it.
    pub fn insert_raw(&self, key: BoardKey, text: impl Into<String>) {
        self.storage().insert(key, text.into());
    }
}

impl StatsStore for InMemoryStore {
    fn load(&self, key: &BoardKey) -> Result<Option<StatsRecord>> {
        let mut storage = self.storage();
        let Some(text) = storage.get(key) else {
            return Ok(None);
        };
        match serde_json::from_str(text) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                log::warn!("dropping corrupt in-memory record {key}: {e}");
                storage.remove(key);
                Ok(None)
            }
        }
    }

    fn save(&self, key: &BoardKey, record: &StatsRecord) -> Result<()> {
        let text = serde_json::to_string(record)?;
        self.storage().insert(key.clone(), text);
        Ok(())
    }

    fn discard(&self, key: &BoardKey) -> Result<()> {
        self.storage().remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<BoardKey>> {
        let mut keys: Vec<BoardKey> = self.storage().keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    fn clear(&self) -> Result<usize> {
        let mut storage = self.storage();
        let removed = storage.len();
        storage.clear();
        Ok(removed)
    }
}

/// Store that keeps nothing; every position starts from defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullStore;

impl StatsStore for NullStore {
    fn load(&self, _key: &BoardKey) -> Result<Option<StatsRecord>> {
        Ok(None)
    }

    fn save(&self, _key: &BoardKey, _record: &StatsRecord) -> Result<()> {
        Ok(())
    }

    fn discard(&self, _key: &BoardKey) -> Result<()> {
        Ok(())
    }

    fn keys(&self) -> Result<Vec<BoardKey>> {
        Ok(Vec::new())
    }

    fn clear(&self) -> Result<usize> {
        Ok(0)
    }
}

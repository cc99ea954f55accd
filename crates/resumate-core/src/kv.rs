//! Key-value persistence interface.
//!
//! Session and history state are stored as string values under fixed keys.
//! Implementations must apply a batch of changes atomically: readers either
//! see the whole batch or none of it.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{ResumateError, Result};

/// Keys of the persisted client state.
pub mod keys {
    pub const ACCESS_TOKEN: &str = "accessToken";
    pub const REFRESH_TOKEN: &str = "refreshToken";
    pub const USER: &str = "user";
    pub const ANALYSIS_HISTORY: &str = "analysisHistory";
    /// Raw text of a history document that could not be decoded.
    pub const ANALYSIS_HISTORY_BACKUP: &str = "analysisHistory.corrupt";
    pub const THEME: &str = "theme";

    /// Keys written and cleared together by the session store.
    pub const SESSION_KEYS: [&str; 3] = [ACCESS_TOKEN, REFRESH_TOKEN, USER];
}

/// A single change inside an atomic batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KvChange {
    Set(String, String),
    Remove(String),
}

impl KvChange {
    pub fn set(key: &str, value: impl Into<String>) -> Self {
        Self::Set(key.to_string(), value.into())
    }

    pub fn remove(key: &str) -> Self {
        Self::Remove(key.to_string())
    }
}

/// Durable string-keyed storage.
pub trait KeyValueStore: Send + Sync {
    /// Reads a single value.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Applies every change in one atomic write.
    fn apply(&self, changes: Vec<KvChange>) -> Result<()>;

    fn set(&self, key: &str, value: String) -> Result<()> {
        self.apply(vec![KvChange::Set(key.to_string(), value)])
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.apply(vec![KvChange::remove(key)])
    }
}

/// In-memory store, used by tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
    writes: AtomicUsize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of batches applied so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Copy of the current contents.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| ResumateError::internal("in-memory store lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn apply(&self, changes: Vec<KvChange>) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| ResumateError::internal("in-memory store lock poisoned"))?;
        for change in changes {
            match change {
                KvChange::Set(key, value) => {
                    entries.insert(key, value);
                }
                KvChange::Remove(key) => {
                    entries.remove(&key);
                }
            }
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

//! Atomic JSON key-value file.
//!
//! All client state lives in a single JSON object mapping keys to string
//! values. Writers hold an exclusive lock across the read-modify-write, and the
//! new contents replace the old file through a temp file + rename, so readers
//! always observe either the previous or the next complete document.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tempfile::NamedTempFile;

use resumate_core::error::{ResumateError, Result};
use resumate_core::kv::{KeyValueStore, KvChange};

type Document = BTreeMap<String, String>;

/// A [`KeyValueStore`] persisted to one JSON file.
///
/// Provides:
/// - **Atomicity**: a batch of changes is written all-or-nothing via tmp file + rename
/// - **Isolation**: an exclusive lock on a sibling `.lock` file serialises writers
/// - **Durability**: explicit fsync before rename
///
/// A document that cannot be parsed is moved aside to `<name>.corrupt` before
/// the next write, never overwritten.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where an unreadable document is preserved.
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".corrupt");
        self.path.with_file_name(name)
    }

    /// Loads the document.
    ///
    /// A missing or empty file is an empty document.
    fn load(&self) -> Result<Document> {
        if !self.path.exists() {
            return Ok(Document::new());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Document::new());
        }

        Ok(serde_json::from_str(&content)?)
    }

    /// Loads the document for a write. Must be called with the lock held.
    fn load_for_update(&self) -> Result<Document> {
        match self.load() {
            Ok(document) => Ok(document),
            Err(e) if e.is_serialization() => {
                let backup = self.backup_path();
                fs::rename(&self.path, &backup)?;
                tracing::warn!(
                    "State file {} is unreadable ({}); moved it to {}",
                    self.path.display(),
                    e,
                    backup.display()
                );
                Ok(Document::new())
            }
            Err(e) => Err(e),
        }
    }

    fn save(&self, document: &Document) -> Result<()> {
        let parent = self.parent_dir()?;
        let json = serde_json::to_string_pretty(document)?;

        let mut tmp_file = NamedTempFile::new_in(parent)?;
        tmp_file.write_all(json.as_bytes())?;
        tmp_file.as_file().sync_all()?;

        tmp_file
            .persist(&self.path)
            .map_err(|e| ResumateError::io(format!("Failed to replace state file: {}", e)))?;
        Ok(())
    }

    fn parent_dir(&self) -> Result<&Path> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| ResumateError::io("State file path has no parent directory"))?;
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
        Ok(parent)
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.remove(key))
    }

    fn apply(&self, changes: Vec<KvChange>) -> Result<()> {
        self.parent_dir()?;
        let _lock = FileLock::acquire(&self.path)?;

        let mut document = self.load_for_update()?;
        for change in changes {
            match change {
                KvChange::Set(key, value) => {
                    document.insert(key, value);
                }
                KvChange::Remove(key) => {
                    document.remove(&key);
                }
            }
        }

        self.save(&document)
    }
}

/// Exclusive lock guard; released when dropped.
///
/// The lock file itself is never removed: unlinking it while held would let a
/// later writer lock a fresh inode alongside a waiter on the old one.
struct FileLock {
    file: File,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self> {
        let lock_path = path.with_extension("lock");

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        file.lock_exclusive()
            .map_err(|e| ResumateError::io(format!("Failed to acquire state lock: {}", e)))?;

        Ok(FileLock { file })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

//! Key-value backed analysis history.

use std::sync::Arc;

use resumate_core::analysis::AnalysisResult;
use resumate_core::clock::Clock;
use resumate_core::error::Result;
use resumate_core::history::{HistoryEntry, HistoryRepository, next_entry_id};
use resumate_core::kv::{KeyValueStore, KvChange, keys};
use resumate_core::session::timestamp;

use crate::dto::{HistoryLog, create_history_migrator, with_legacy_version};

/// Stores the history as one versioned document under `analysisHistory`.
///
/// Each append reads, extends and rewrites the whole log. An undecodable log
/// reads as empty; the next append keeps its raw text under
/// `analysisHistory.corrupt`.
pub struct HistoryStore {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
}

impl HistoryStore {
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Reads the log, returning the raw text alongside when it is unreadable.
    fn load_log(&self) -> Result<(HistoryLog, Option<String>)> {
        let raw = self
            .store
            .get(keys::ANALYSIS_HISTORY)?
            .filter(|raw| !raw.trim().is_empty());
        let Some(raw) = raw else {
            return Ok((HistoryLog::default(), None));
        };

        match decode_log(&raw) {
            Ok(log) => Ok((log, None)),
            Err(e) => {
                tracing::warn!("Stored analysis history is unreadable, treating it as empty: {}", e);
                Ok((HistoryLog::default(), Some(raw)))
            }
        }
    }

    fn save_log(&self, log: &HistoryLog, unreadable: Option<String>) -> Result<()> {
        let migrator = create_history_migrator();
        let json = migrator.save_domain_flat("analysis_history", log)?;

        let mut changes = vec![KvChange::set(keys::ANALYSIS_HISTORY, json)];
        if let Some(raw) = unreadable {
            changes.push(KvChange::set(keys::ANALYSIS_HISTORY_BACKUP, raw));
        }
        self.store.apply(changes)
    }
}

fn decode_log(raw: &str) -> Result<HistoryLog> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    let value = with_legacy_version(value, "1.0.0");
    let migrator = create_history_migrator();
    Ok(migrator.load_flat_from("analysis_history", value)?)
}

impl HistoryRepository for HistoryStore {
    fn append(&self, result: &AnalysisResult) -> Result<HistoryEntry> {
        let (mut log, unreadable) = self.load_log()?;

        let now = self.clock.now_millis();
        let largest = log.entries.iter().map(|entry| entry.id).max();
        let entry = HistoryEntry {
            id: next_entry_id(now, largest),
            timestamp: timestamp::display_local(now),
            result: result.clone(),
        };

        log.entries.push(entry.clone());
        self.save_log(&log, unreadable)?;

        tracing::info!(
            "Saved analysis {} to history ({} entries)",
            entry.id,
            log.entries.len()
        );
        Ok(entry)
    }

    fn list(&self) -> Result<Vec<HistoryEntry>> {
        let mut entries = self.load_log()?.0.entries;
        entries.reverse();
        Ok(entries)
    }
}

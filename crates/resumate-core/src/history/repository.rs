//! History repository trait.

use crate::analysis::AnalysisResult;
use crate::error::Result;
use crate::history::model::HistoryEntry;

/// Local log of saved analysis results.
///
/// Each append rewrites the whole list in one write. A single writer is
/// assumed.
pub trait HistoryRepository: Send + Sync {
    /// Snapshots `result` into a new entry and persists it.
    fn append(&self, result: &AnalysisResult) -> Result<HistoryEntry>;

    /// All entries, most recent first.
    fn list(&self) -> Result<Vec<HistoryEntry>>;

    fn find_by_id(&self, id: i64) -> Result<Option<HistoryEntry>> {
        Ok(self.list()?.into_iter().find(|entry| entry.id == id))
    }
}

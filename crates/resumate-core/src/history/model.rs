//! History entry model.

use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisResult;

/// A saved analysis result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Unique and strictly increasing within one history log.
    pub id: i64,
    /// Local display time at which the entry was saved.
    pub timestamp: String,
    #[serde(flatten)]
    pub result: AnalysisResult,
}

impl HistoryEntry {
    pub fn matched_count(&self) -> usize {
        self.result.matched_skills.len()
    }

    pub fn missing_count(&self) -> usize {
        self.result.missing_skills.len()
    }
}

/// Picks the id for a new entry.
///
/// Uses the current time in milliseconds unless the clock has not moved past
/// the largest existing id, in which case the id is `largest + 1`.
pub fn next_entry_id(now_millis: i64, largest_existing: Option<i64>) -> i64 {
    match largest_existing {
        Some(largest) if now_millis <= largest => largest.saturating_add(1),
        _ => now_millis,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_entry_id() {
        assert_eq!(next_entry_id(1_000, None), 1_000);
        assert_eq!(next_entry_id(1_000, Some(999)), 1_000);
        assert_eq!(next_entry_id(1_000, Some(1_000)), 1_001);
        assert_eq!(next_entry_id(500, Some(1_000)), 1_001);
    }

    #[test]
    fn test_entry_serializes_result_fields_inline() {
        let entry = HistoryEntry {
            id: 1,
            timestamp: "2024-01-15 10:30:00".to_string(),
            result: AnalysisResult {
                match_percentage: 72.5,
                matched_skills: ["Rust".to_string()].into(),
                missing_skills: Default::default(),
                suggestions: vec!["Add tests".to_string()],
                ai_suggestions: Vec::new(),
                report: None,
            },
        };
        let value = serde_json::to_value(&entry).unwrap();

        assert_eq!(value["matchPercentage"], 72.5);
        assert_eq!(value["matchedSkills"][0], "Rust");
        assert_eq!(entry.matched_count(), 1);
        assert_eq!(entry.missing_count(), 0);
    }
}

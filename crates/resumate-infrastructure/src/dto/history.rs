//! Analysis history DTOs.
//!
//! The whole history is one flat document: `{"version": .., "entries": [..]}`.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use version_migrate::{FromDomain, IntoDomain, Versioned};

use resumate_core::analysis::AnalysisResult;
use resumate_core::history::HistoryEntry;

/// Persisted history, oldest entry first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryLog {
    pub entries: Vec<HistoryEntry>,
}

/// One saved analysis as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntryV1_0_0 {
    pub id: i64,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub match_percentage: f64,
    #[serde(default)]
    pub matched_skills: Vec<String>,
    #[serde(default)]
    pub missing_skills: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub ai_suggestions: Vec<String>,
    #[serde(default)]
    pub report: Option<String>,
}

/// History log V1.0.0.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
pub struct HistoryLogV1_0_0 {
    #[serde(default)]
    pub entries: Vec<HistoryEntryV1_0_0>,
}

impl From<HistoryEntryV1_0_0> for HistoryEntry {
    fn from(dto: HistoryEntryV1_0_0) -> Self {
        HistoryEntry {
            id: dto.id,
            timestamp: dto.timestamp,
            result: AnalysisResult {
                match_percentage: dto.match_percentage,
                matched_skills: dto.matched_skills.into_iter().collect::<BTreeSet<_>>(),
                missing_skills: dto.missing_skills.into_iter().collect::<BTreeSet<_>>(),
                suggestions: dto.suggestions,
                ai_suggestions: dto.ai_suggestions,
                report: dto.report,
            },
        }
    }
}

impl From<HistoryEntry> for HistoryEntryV1_0_0 {
    fn from(entry: HistoryEntry) -> Self {
        let result = entry.result;
        HistoryEntryV1_0_0 {
            id: entry.id,
            timestamp: entry.timestamp,
            match_percentage: result.match_percentage,
            matched_skills: result.matched_skills.into_iter().collect(),
            missing_skills: result.missing_skills.into_iter().collect(),
            suggestions: result.suggestions,
            ai_suggestions: result.ai_suggestions,
            report: result.report,
        }
    }
}

// ============================================================================
// Domain model conversions
// ============================================================================

impl IntoDomain<HistoryLog> for HistoryLogV1_0_0 {
    fn into_domain(self) -> HistoryLog {
        HistoryLog {
            entries: self.entries.into_iter().map(HistoryEntry::from).collect(),
        }
    }
}

impl FromDomain<HistoryLog> for HistoryLogV1_0_0 {
    fn from_domain(log: HistoryLog) -> Self {
        HistoryLogV1_0_0 {
            entries: log.entries.into_iter().map(HistoryEntryV1_0_0::from).collect(),
        }
    }
}

// ============================================================================
// Migrator factory
// ============================================================================

/// Creates a migrator for the persisted `analysisHistory` document.
pub fn create_history_migrator() -> version_migrate::Migrator {
    version_migrate::migrator!("analysis_history" => [HistoryLogV1_0_0, HistoryLog], save = true)
        .expect("Failed to create analysis_history migrator")
}

//! Data Transfer Objects (DTOs) for persistence.
//!
//! These DTOs represent the versioned schema of the persisted client state.
//! They are private to the infrastructure layer and handle the evolution of
//! the storage format over time.
//!
//! ### UserProfile Version History
//! - **1.0.0**: `createdAt` stored as the server sent it
//! - **2.0.0**: `createdAt` normalised to epoch milliseconds
//!
//! ### History Version History
//! - **1.0.0**: Initial schema (`entries` list, oldest first)

mod history;
mod user_profile;

pub use history::{HistoryEntryV1_0_0, HistoryLog, HistoryLogV1_0_0, create_history_migrator};
pub use user_profile::{UserProfileV1_0_0, UserProfileV2_0_0, create_user_profile_migrator};

use serde_json::Value;

/// Tags an unversioned document with `version`.
///
/// State written before schema versioning had no `version` field. A bare JSON
/// array (the old history format) is wrapped as `{"entries": [..]}`.
pub(crate) fn with_legacy_version(value: Value, version: &str) -> Value {
    match value {
        Value::Object(mut map) => {
            if !map.contains_key("version") {
                map.insert("version".to_string(), Value::String(version.to_string()));
            }
            Value::Object(map)
        }
        Value::Array(entries) => serde_json::json!({
            "version": version,
            "entries": entries,
        }),
        other => other,
    }
}

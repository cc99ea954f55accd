//! Infrastructure layer: durable storage, schema-versioned persistence,
//! configuration and file loading.

pub mod config_service;
pub mod dto;
pub mod history_store;
pub mod paths;
pub mod preference_store;
pub mod resume_file_loader;
pub mod session_store;
pub mod storage;

pub use crate::config_service::{ConfigOverrides, ConfigService};
pub use crate::history_store::HistoryStore;
pub use crate::paths::ResumatePaths;
pub use crate::preference_store::PreferenceStore;
pub use crate::session_store::SessionStore;
pub use crate::storage::JsonFileStore;

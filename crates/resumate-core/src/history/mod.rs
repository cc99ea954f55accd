//! Analysis history domain module.
//!
//! # Module Structure
//!
//! - `model`: Saved entries and id assignment (`HistoryEntry`)
//! - `repository`: History persistence trait

mod model;
mod repository;

pub use model::{HistoryEntry, next_entry_id};
pub use repository::HistoryRepository;

//! Domain layer of the Resumate client.
//!
//! Holds the error taxonomy, domain models, request building, result
//! presentation, and the persistence and transport traits implemented by the
//! outer crates. Nothing in this crate performs I/O.

pub mod analysis;
pub mod api;
pub mod clock;
pub mod config;
pub mod error;
pub mod history;
pub mod kv;
pub mod presenter;
pub mod session;
pub mod theme;

// Re-export common error type
pub use error::{ResumateError, Result};

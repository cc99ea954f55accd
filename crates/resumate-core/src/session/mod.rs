//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: Session and user profile models with expiry rules
//! - `repository`: Session persistence trait
//! - `timestamp`: Decoding of server creation times

mod model;
mod repository;
pub mod timestamp;

pub use model::{Session, UserProfile};
pub use repository::SessionRepository;

//! Application layer for Resumate.
//!
//! Use cases that coordinate the domain, storage and transport layers:
//! authentication, analysis sequencing and server information.

pub mod analysis_service;
pub mod app;
pub mod auth_client;
pub mod server_info;
pub mod single_flight;

#[cfg(test)]
mod testing;

pub use analysis_service::AnalysisService;
pub use app::ResumateApp;
pub use auth_client::AuthClient;
pub use server_info::{HealthStatus, ServerInfoService, SkillCatalog};

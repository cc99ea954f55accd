//! Application context.
//!
//! `ResumateApp` wires storage, transport and use cases together once at
//! startup and is passed explicitly to every command.

use std::sync::Arc;

use resumate_core::api::ApiTransport;
use resumate_core::clock::{Clock, SystemClock};
use resumate_core::config::ClientConfig;
use resumate_core::error::Result;
use resumate_core::kv::KeyValueStore;
use resumate_infrastructure::{ConfigService, HistoryStore, JsonFileStore, PreferenceStore, SessionStore};
use resumate_interaction::HttpTransport;

use crate::analysis_service::AnalysisService;
use crate::auth_client::AuthClient;
use crate::server_info::ServerInfoService;

pub struct ResumateApp {
    pub config: ClientConfig,
    pub auth: Arc<AuthClient>,
    pub analysis: Arc<AnalysisService>,
    pub server: ServerInfoService,
    pub preferences: PreferenceStore,
}

impl ResumateApp {
    /// Builds the production context: JSON state file, system clock, HTTP transport.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let state_file = ConfigService::state_file(&config)?;
        tracing::debug!("Using state file {}", state_file.display());

        let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::new(state_file));
        let transport: Arc<dyn ApiTransport> = Arc::new(HttpTransport::new(
            config.api.base_url.clone(),
            config.api.timeout(),
        ));
        Self::with_parts(config, store, Arc::new(SystemClock), transport)
    }

    /// Builds a context from explicit parts and restores the persisted session.
    pub fn with_parts(
        config: ClientConfig,
        store: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        transport: Arc<dyn ApiTransport>,
    ) -> Result<Self> {
        let sessions = Arc::new(SessionStore::new(store.clone(), clock.clone()));
        let history = Arc::new(HistoryStore::new(store.clone(), clock));

        let auth = Arc::new(AuthClient::new(transport.clone(), sessions.clone()));
        auth.restore()?;

        Ok(Self {
            config,
            auth,
            analysis: Arc::new(AnalysisService::new(transport.clone(), sessions, history)),
            server: ServerInfoService::new(transport),
            preferences: PreferenceStore::new(store),
        })
    }
}

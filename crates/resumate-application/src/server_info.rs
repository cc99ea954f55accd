//! Backend health and skill catalogue.

use std::sync::Arc;

use serde::Deserialize;

use resumate_core::api::{ApiRequest, ApiTransport, Endpoint};
use resumate_core::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

impl HealthStatus {
    pub fn is_up(&self) -> bool {
        self.status.eq_ignore_ascii_case("up")
    }
}

/// Skills the server knows how to match.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillCatalog {
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub total_count: usize,
    #[serde(default)]
    pub description: Option<String>,
}

pub struct ServerInfoService {
    transport: Arc<dyn ApiTransport>,
}

impl ServerInfoService {
    pub fn new(transport: Arc<dyn ApiTransport>) -> Self {
        Self { transport }
    }

    pub async fn health(&self) -> Result<HealthStatus> {
        let reply = self
            .transport
            .execute(&ApiRequest::get(Endpoint::Health), None)
            .await?;
        if !reply.is_success() {
            return Err(reply.into_error());
        }
        reply.json()
    }

    pub async fn skills(&self) -> Result<SkillCatalog> {
        let reply = self
            .transport
            .execute(&ApiRequest::get(Endpoint::Skills), None)
            .await?;
        if !reply.is_success() {
            return Err(reply.into_error());
        }
        let mut catalog: SkillCatalog = reply.json()?;
        if catalog.total_count == 0 {
            catalog.total_count = catalog.skills.len();
        }
        Ok(catalog)
    }
}

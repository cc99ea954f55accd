//! Configuration service implementation.
//!
//! Loads the client configuration from `~/.config/resumate/config.toml`,
//! applies environment overrides, then explicit overrides (CLI flags), and
//! caches the result.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use resumate_core::config::ClientConfig;
use resumate_core::error::{ResumateError, Result};

use crate::paths::ResumatePaths;

pub const ENV_API_URL: &str = "RESUMATE_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "RESUMATE_TIMEOUT_SECS";
pub const ENV_STATE_FILE: &str = "RESUMATE_STATE_FILE";
pub const ENV_LOG: &str = "RESUMATE_LOG";

/// Overrides that take precedence over both the file and the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Alternative config file location.
    pub config_file: Option<PathBuf>,
    pub api_url: Option<String>,
}

/// Configuration service that loads and caches the client configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    overrides: ConfigOverrides,
    /// Cached configuration; loaded lazily on first access.
    config: Arc<RwLock<Option<ClientConfig>>>,
}

impl ConfigService {
    pub fn new(overrides: ConfigOverrides) -> Self {
        Self {
            overrides,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the configuration, loading it if not cached.
    pub fn get_config(&self) -> Result<ClientConfig> {
        {
            let read_lock = self
                .config
                .read()
                .map_err(|_| ResumateError::internal("config cache lock poisoned"))?;
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let loaded = self.load_config()?;

        {
            let mut write_lock = self
                .config
                .write()
                .map_err(|_| ResumateError::internal("config cache lock poisoned"))?;
            *write_lock = Some(loaded.clone());
        }

        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = None;
        }
    }

    /// Location of the persisted client state for `config`.
    pub fn state_file(config: &ClientConfig) -> Result<PathBuf> {
        match &config.storage.state_file {
            Some(path) => Ok(ResumatePaths::expand_home(path)),
            None => ResumatePaths::state_file(),
        }
    }

    fn load_config(&self) -> Result<ClientConfig> {
        let path = match &self.overrides.config_file {
            Some(path) => ResumatePaths::expand_home(path),
            None => ResumatePaths::config_file()?,
        };
        let mut config = read_config_file(&path)?;

        apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;

        if let Some(api_url) = &self.overrides.api_url {
            config.api.base_url = api_url.clone();
        }

        validate(&config)?;
        tracing::debug!(
            "Configuration loaded (api: {}, timeout: {}s)",
            config.api.base_url,
            config.api.timeout_secs
        );
        Ok(config)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new(ConfigOverrides::default())
    }
}

/// Reads a config file. A missing file yields the defaults.
fn read_config_file(path: &Path) -> Result<ClientConfig> {
    if !path.exists() {
        tracing::debug!("No config file at {}, using defaults", path.display());
        return Ok(ClientConfig::default());
    }

    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| {
        ResumateError::config(format!("Invalid config file {}: {}", path.display(), e))
    })
}

/// Applies `RESUMATE_*` overrides read through `lookup`.
fn apply_env_overrides<F>(config: &mut ClientConfig, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    if let Some(url) = lookup(ENV_API_URL) {
        config.api.base_url = url;
    }
    if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
        config.api.timeout_secs = raw.trim().parse().map_err(|_| {
            ResumateError::config(format!(
                "{} must be a whole number of seconds, got '{}'",
                ENV_TIMEOUT_SECS, raw
            ))
        })?;
    }
    if let Some(path) = lookup(ENV_STATE_FILE) {
        config.storage.state_file = Some(PathBuf::from(path));
    }
    if let Some(level) = lookup(ENV_LOG) {
        config.logging.level = level;
    }
    Ok(())
}

fn validate(config: &ClientConfig) -> Result<()> {
    if config.api.base_url.trim().is_empty() {
        return Err(ResumateError::config("api.base_url must not be empty"));
    }
    if config.api.timeout_secs == 0 {
        return Err(ResumateError::config("api.timeout_secs must be greater than 0"));
    }
    Ok(())
}

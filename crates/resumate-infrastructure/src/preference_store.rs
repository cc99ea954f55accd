//! Persisted user preferences.

use std::sync::Arc;

use resumate_core::error::Result;
use resumate_core::kv::{KeyValueStore, keys};
use resumate_core::theme::Theme;

pub struct PreferenceStore {
    store: Arc<dyn KeyValueStore>,
}

impl PreferenceStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Stored theme; unknown or missing values fall back to light.
    pub fn theme(&self) -> Theme {
        match self.store.get(keys::THEME) {
            Ok(Some(raw)) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!("Ignoring unknown stored theme '{}'", raw);
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(e) => {
                tracing::warn!("Failed to read theme preference: {}", e);
                Theme::default()
            }
        }
    }

    pub fn set_theme(&self, theme: Theme) -> Result<()> {
        self.store.set(keys::THEME, theme.as_str().to_string())
    }

    pub fn toggle_theme(&self) -> Result<Theme> {
        let next = self.theme().toggled();
        self.set_theme(next)?;
        Ok(next)
    }
}

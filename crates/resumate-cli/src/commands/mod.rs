pub mod analyze;
pub mod auth;
pub mod history;
pub mod server;
pub mod theme;

use anyhow::{Context, Result};
use dialoguer::Password;
use dialoguer::theme::ColorfulTheme;

/// Prompts for a secret on the terminal without echoing it.
pub(crate) fn prompt_password(label: &str) -> Result<String> {
    Password::with_theme(&ColorfulTheme::default())
        .with_prompt(label)
        .allow_empty_password(true)
        .interact()
        .context("Failed to read password")
}

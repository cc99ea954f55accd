use anyhow::Result;
use colored::Colorize;

use resumate_application::ResumateApp;
use resumate_core::theme::Theme;

use crate::render::heading;

pub async fn health(app: &ResumateApp) -> Result<()> {
    let status = app.server.health().await?;

    let label = if status.is_up() {
        status.status.green()
    } else {
        status.status.red()
    };
    match &status.version {
        Some(version) => println!("{} (v{}) at {}", label, version, app.config.api.base_url),
        None => println!("{} at {}", label, app.config.api.base_url),
    }
    if let Some(message) = &status.message {
        println!("  {}", message.bright_black());
    }
    Ok(())
}

pub async fn skills(app: &ResumateApp, limit: Option<usize>, theme: Theme) -> Result<()> {
    let catalog = app.server.skills().await?;

    println!(
        "{} ({})",
        heading("Known skills", theme),
        catalog.total_count
    );
    if let Some(description) = &catalog.description {
        println!("  {}", description.bright_black());
    }

    let shown = limit.unwrap_or(catalog.skills.len());
    for skill in catalog.skills.iter().take(shown) {
        println!("  - {}", skill);
    }
    if shown < catalog.skills.len() {
        println!(
            "  {}",
            format!("... and {} more", catalog.skills.len() - shown).bright_black()
        );
    }
    Ok(())
}

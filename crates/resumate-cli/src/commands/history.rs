use anyhow::Result;

use resumate_application::ResumateApp;
use resumate_core::error::ResumateError;
use resumate_core::presenter::{present, summarize};
use resumate_core::theme::Theme;

use crate::render;

pub fn list(app: &ResumateApp, theme: Theme) -> Result<()> {
    let summaries: Vec<_> = app.analysis.history()?.iter().map(summarize).collect();
    render::print_history(&summaries, theme);
    Ok(())
}

pub fn show(app: &ResumateApp, id: i64, theme: Theme) -> Result<()> {
    let entry = app
        .analysis
        .open_saved(id)?
        .ok_or_else(|| ResumateError::validation(format!("No saved analysis with id {}", id)))?;

    println!("{} {}", render::heading("Saved", theme), entry.timestamp);
    render::print_analysis(&present(&entry.result), theme);
    Ok(())
}

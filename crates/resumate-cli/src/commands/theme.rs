use anyhow::Result;

use resumate_application::ResumateApp;
use resumate_core::theme::Theme;

use crate::render::heading;

pub enum ThemeCommand {
    Show,
    Toggle,
    Light,
    Dark,
}

pub fn run(app: &ResumateApp, command: ThemeCommand) -> Result<()> {
    let theme = match command {
        ThemeCommand::Show => app.preferences.theme(),
        ThemeCommand::Toggle => app.preferences.toggle_theme()?,
        ThemeCommand::Light => set(app, Theme::Light)?,
        ThemeCommand::Dark => set(app, Theme::Dark)?,
    };
    println!("{} {}", heading("Theme:", theme), theme);
    Ok(())
}

fn set(app: &ResumateApp, theme: Theme) -> Result<Theme> {
    app.preferences.set_theme(theme)?;
    Ok(theme)
}

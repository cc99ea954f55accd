use std::path::PathBuf;

use anyhow::Result;
use colored::Colorize;

use resumate_application::ResumateApp;
use resumate_core::analysis::{ResumeInput, build_request};
use resumate_core::error::ResumateError;
use resumate_core::presenter::present;
use resumate_core::theme::Theme;
use resumate_infrastructure::resume_file_loader::{load_resume_file, load_text};

use crate::render;

/// Inputs collected from the command line.
pub struct AnalyzeInput {
    pub resume_file: Option<PathBuf>,
    pub resume_text: Option<String>,
    pub resume_text_file: Option<PathBuf>,
    pub jd_text: Option<String>,
    pub jd_text_file: Option<PathBuf>,
    pub jd_url: Option<String>,
    pub save: bool,
}

pub async fn run(app: &ResumateApp, input: AnalyzeInput, theme: Theme) -> Result<()> {
    let resume = if let Some(path) = &input.resume_file {
        let file = load_resume_file(path).await?;
        println!(
            "{} {} ({}, {})",
            render::heading("Resume:", theme),
            file.file_name(),
            file.kind_label(),
            file.size_label()
        );
        ResumeInput::from_file(file)
    } else if let Some(path) = &input.resume_text_file {
        ResumeInput::from_text(load_text(path).await?)
    } else {
        ResumeInput::from_text(input.resume_text.unwrap_or_default())
    };

    let jd_text = match &input.jd_text_file {
        Some(path) => load_text(path).await?,
        None => input.jd_text.unwrap_or_default(),
    };
    let jd_url = input.jd_url.unwrap_or_default();

    let request = build_request(resume, &jd_text, &jd_url)?;

    if !app.auth.is_signed_in() {
        println!("{}", "Not signed in; analyzing anonymously.".yellow());
    }
    println!("{}", "Analyzing...".bright_black());

    let result = match app.analysis.analyze(&request).await {
        Ok(result) => result,
        Err(ResumateError::Api { status, message }) => {
            anyhow::bail!("Failed to analyze resume: {} ({})", message, status)
        }
        Err(e) => return Err(e.into()),
    };

    println!();
    render::print_analysis(&present(&result), theme);

    if input.save {
        let entry = app.analysis.save_last()?;
        println!();
        println!("{}", format!("Saved to history as #{}", entry.id).green());
    }
    Ok(())
}

//! Terminal rendering of view models.
//!
//! View models carry HTML-escaped text; the terminal shows it as plain text.

use std::fmt::Write as _;

use colored::{ColoredString, Colorize};

use resumate_core::error::ResumateError;
use resumate_core::presenter::{
    HistorySummary, NO_AI_SUGGESTIONS, NO_SKILLS, NO_SUGGESTIONS, Severity, ViewModel,
};
use resumate_core::theme::Theme;

pub fn heading(text: &str, theme: Theme) -> ColoredString {
    match theme {
        Theme::Light => text.blue().bold(),
        Theme::Dark => text.bright_cyan().bold(),
    }
}

pub fn severity(text: &str, severity: Severity) -> ColoredString {
    match severity {
        Severity::Low => text.red(),
        Severity::Medium => text.yellow(),
        Severity::High => text.green(),
    }
}

/// User-facing message for an error raised anywhere below `main`.
pub fn error_message(error: &anyhow::Error) -> String {
    match error.downcast_ref::<ResumateError>() {
        Some(e) => e.user_message(),
        None => format!("{:#}", error),
    }
}

/// Reverses the presenter's HTML escaping.
fn plain(escaped: &str) -> String {
    escaped
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

pub fn print_analysis(view: &ViewModel, theme: Theme) {
    print!("{}", format_analysis(view, theme));
}

fn format_analysis(view: &ViewModel, theme: Theme) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {}\n",
        heading("Match:", theme),
        severity(&view.percentage_label, view.severity).bold()
    );

    write_skills(&mut out, "Matched skills", &view.matched_skills, theme, |s| s.green());
    write_skills(&mut out, "Missing skills", &view.missing_skills, theme, |s| s.red());
    write_list(&mut out, "Suggestions", &view.suggestions, NO_SUGGESTIONS, theme);
    write_list(&mut out, "AI suggestions", &view.ai_suggestions, NO_AI_SUGGESTIONS, theme);

    let _ = writeln!(out, "{}", heading("Report", theme));
    let _ = writeln!(out, "{}", plain(&view.report));
    out
}

fn write_skills(
    out: &mut String,
    title: &str,
    skills: &[String],
    theme: Theme,
    paint: fn(&str) -> ColoredString,
) {
    let _ = writeln!(out, "{} ({})", heading(title, theme), skills.len());
    if skills.is_empty() {
        let _ = writeln!(out, "  {}", NO_SKILLS.bright_black());
    } else {
        let badges: Vec<String> = skills
            .iter()
            .map(|skill| paint(&format!("[{}]", plain(skill))).to_string())
            .collect();
        let _ = writeln!(out, "  {}", badges.join(" "));
    }
    out.push('\n');
}

fn write_list(out: &mut String, title: &str, items: &[String], empty: &str, theme: Theme) {
    let _ = writeln!(out, "{}", heading(title, theme));
    if items.is_empty() {
        let _ = writeln!(out, "  {}", empty.bright_black());
    } else {
        for item in items {
            let _ = writeln!(out, "  - {}", plain(item));
        }
    }
    out.push('\n');
}

pub fn print_history(entries: &[HistorySummary], theme: Theme) {
    if entries.is_empty() {
        println!("{}", "No saved analyses yet.".bright_black());
        return;
    }

    println!("{}", heading("Saved analyses", theme));
    for entry in entries {
        println!(
            "  {}  {}  {:>6}  {} matched, {} missing",
            entry.id.to_string().bright_black(),
            plain(&entry.timestamp),
            severity(&entry.percentage_label, entry.severity),
            entry.matched_count,
            entry.missing_count
        );
    }
}

//! Mapping of analysis results to renderable view models.
//!
//! Presenting is pure: the same result always yields the same view model.
//! All user-controlled strings are HTML-escaped so any adapter can render
//! them as markup.

use crate::analysis::AnalysisResult;
use crate::history::HistoryEntry;

pub const NO_SKILLS: &str = "None";
pub const NO_SUGGESTIONS: &str = "No suggestions available";
pub const NO_AI_SUGGESTIONS: &str = "AI suggestions not available (check API key)";
pub const NO_REPORT: &str = "No report available";

/// Color band of a match score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Below 50%.
    Low,
    /// 50% up to (not including) 80%.
    Medium,
    /// 80% and above.
    High,
}

impl Severity {
    /// Band for an already rounded percentage.
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage < 50.0 {
            Severity::Low
        } else if percentage < 80.0 {
            Severity::Medium
        } else {
            Severity::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

/// Display-ready form of an [`AnalysisResult`].
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    /// Score rounded to one decimal.
    pub percentage: f64,
    /// e.g. `"72.5%"`.
    pub percentage_label: String,
    pub severity: Severity,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub suggestions: Vec<String>,
    pub ai_suggestions: Vec<String>,
    /// Report text, or [`NO_REPORT`].
    pub report: String,
}

/// One line of the history list.
#[derive(Debug, Clone, PartialEq)]
pub struct HistorySummary {
    pub id: i64,
    pub timestamp: String,
    pub percentage_label: String,
    pub severity: Severity,
    pub matched_count: usize,
    pub missing_count: usize,
}

pub fn present(result: &AnalysisResult) -> ViewModel {
    let percentage = round_percentage(result.match_percentage);
    let report = result
        .report
        .as_deref()
        .filter(|report| !report.trim().is_empty())
        .map(escape_html)
        .unwrap_or_else(|| NO_REPORT.to_string());

    ViewModel {
        percentage,
        percentage_label: format_percentage(percentage),
        severity: Severity::from_percentage(percentage),
        matched_skills: escape_all(&result.matched_skills),
        missing_skills: escape_all(&result.missing_skills),
        suggestions: escape_all(&result.suggestions),
        ai_suggestions: escape_all(&result.ai_suggestions),
        report,
    }
}

pub fn summarize(entry: &HistoryEntry) -> HistorySummary {
    let percentage = round_percentage(entry.result.match_percentage);
    HistorySummary {
        id: entry.id,
        timestamp: escape_html(&entry.timestamp),
        percentage_label: format_percentage(percentage),
        severity: Severity::from_percentage(percentage),
        matched_count: entry.matched_count(),
        missing_count: entry.missing_count(),
    }
}

/// Rounds to one decimal. Non-finite input becomes 0.
fn round_percentage(raw: f64) -> f64 {
    if !raw.is_finite() {
        return 0.0;
    }
    (raw * 10.0).round() / 10.0
}

fn format_percentage(rounded: f64) -> String {
    format!("{rounded:.1}%")
}

fn escape_all<'a>(items: impl IntoIterator<Item = &'a String>) -> Vec<String> {
    items.into_iter().map(|item| escape_html(item)).collect()
}

/// Escapes the characters that are unsafe inside HTML text and attributes.
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(match_percentage: f64) -> AnalysisResult {
        AnalysisResult {
            match_percentage,
            matched_skills: ["Rust".to_string(), "<script>".to_string()].into(),
            missing_skills: ["Go".to_string()].into(),
            suggestions: vec!["Mention \"async\"".to_string()],
            ai_suggestions: Vec::new(),
            report: None,
        }
    }

    #[test]
    fn test_present_is_deterministic() {
        let input = result(66.66);
        assert_eq!(present(&input), present(&input));
    }

    #[test]
    fn test_percentage_label_and_bands() {
        assert_eq!(present(&result(66.66)).percentage_label, "66.7%");
        assert_eq!(present(&result(49.9)).severity, Severity::Low);
        assert_eq!(present(&result(50.0)).severity, Severity::Medium);
        assert_eq!(present(&result(80.0)).severity, Severity::High);
    }

    #[test]
    fn test_band_uses_rounded_value() {
        let view = present(&result(79.96));
        assert_eq!(view.percentage_label, "80.0%");
        assert_eq!(view.severity, Severity::High);

        assert_eq!(present(&result(49.96)).severity, Severity::Medium);
    }

    #[test]
    fn test_non_finite_percentage_presents_as_zero() {
        let view = present(&result(f64::NAN));
        assert_eq!(view.percentage_label, "0.0%");
        assert_eq!(view.severity, Severity::Low);
        assert_eq!(present(&result(f64::INFINITY)).percentage, 0.0);
    }

    #[test]
    fn test_escapes_untrusted_text() {
        let view = present(&result(10.0));
        assert!(view.matched_skills.contains(&"&lt;script&gt;".to_string()));
        assert_eq!(view.suggestions, vec!["Mention &quot;async&quot;"]);
    }

    #[test]
    fn test_report_fallback() {
        assert_eq!(present(&result(10.0)).report, NO_REPORT);

        let mut with_report = result(10.0);
        with_report.report = Some("   ".to_string());
        assert_eq!(present(&with_report).report, NO_REPORT);

        with_report.report = Some("Fit: good & solid".to_string());
        assert_eq!(present(&with_report).report, "Fit: good &amp; solid");
    }

    #[test]
    fn test_summarize_counts() {
        let entry = HistoryEntry {
            id: 42,
            timestamp: "2024-01-15 10:30:00".to_string(),
            result: result(85.04),
        };
        let summary = summarize(&entry);

        assert_eq!(summary.percentage_label, "85.0%");
        assert_eq!(summary.severity, Severity::High);
        assert_eq!(summary.matched_count, 2);
        assert_eq!(summary.missing_count, 1);
    }
}

//! Analysis result model.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Result payload returned by the analysis endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Match score in percent, nominally 0 to 100.
    pub match_percentage: f64,
    #[serde(default)]
    pub matched_skills: BTreeSet<String>,
    #[serde(default)]
    pub missing_skills: BTreeSet<String>,
    /// Rule-based suggestions, in server order.
    #[serde(default)]
    pub suggestions: Vec<String>,
    /// AI-generated suggestions; empty when the server has no AI backend configured.
    #[serde(default)]
    pub ai_suggestions: Vec<String>,
    #[serde(default)]
    pub report: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_server_payload_without_ai_suggestions() {
        let body = r#"{
            "matchPercentage": 66.6667,
            "matchedSkills": ["Rust", "SQL", "Rust"],
            "missingSkills": ["Kubernetes"],
            "suggestions": ["Add metrics"],
            "report": null
        }"#;
        let result: AnalysisResult = serde_json::from_str(body).unwrap();

        assert_eq!(result.matched_skills.len(), 2);
        assert!(result.ai_suggestions.is_empty());
        assert_eq!(result.report, None);
    }
}

//! Analysis request building.
//!
//! [`build_request`] validates the user's input and produces an
//! [`AnalysisRequest`]; [`AnalysisRequest::to_api_request`] turns it into the
//! wire description executed by the transport. Nothing here performs I/O.

use serde_json::json;

use crate::analysis::file::ResumeFile;
use crate::api::{ApiRequest, Endpoint, FormPart, FormValue, RequestBody};
use crate::error::{ResumateError, Result};

pub const MISSING_JOB_DESCRIPTION: &str =
    "Provide a job description or a LinkedIn/Internshala job link.";
pub const MISSING_RESUME_TEXT: &str = "Please enter resume text or upload a file.";

/// Where the resume comes from. A selected file takes precedence over text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResumeInput {
    pub text: Option<String>,
    pub file: Option<ResumeFile>,
}

impl ResumeInput {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            file: None,
        }
    }

    pub fn from_file(file: ResumeFile) -> Self {
        Self {
            text: None,
            file: Some(file),
        }
    }
}

/// How the resume is submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisMode {
    File,
    Text,
}

/// A validated analysis request.
///
/// At least one of the job description fields is non-empty, and in text mode
/// the resume text is non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisRequest {
    File {
        file: ResumeFile,
        job_description_text: String,
        job_description_url: String,
    },
    Text {
        resume_text: String,
        job_description_text: String,
        job_description_url: String,
    },
}

impl AnalysisRequest {
    pub fn mode(&self) -> AnalysisMode {
        match self {
            AnalysisRequest::File { .. } => AnalysisMode::File,
            AnalysisRequest::Text { .. } => AnalysisMode::Text,
        }
    }

    /// Wire description: multipart upload for files, JSON for text.
    pub fn to_api_request(&self) -> ApiRequest {
        match self {
            AnalysisRequest::File {
                file,
                job_description_text,
                job_description_url,
            } => {
                let parts = vec![
                    FormPart {
                        name: "resumeFile".to_string(),
                        value: FormValue::File {
                            file_name: file.file_name().to_string(),
                            mime_type: file.content_type().to_string(),
                            bytes: file.bytes().to_vec(),
                        },
                    },
                    FormPart::text("jobDescriptionText", job_description_text.as_str()),
                    FormPart::text("jobDescriptionUrl", job_description_url.as_str()),
                ];
                ApiRequest::new(Endpoint::AnalyzeFile, RequestBody::Multipart(parts))
            }
            AnalysisRequest::Text {
                resume_text,
                job_description_text,
                job_description_url,
            } => ApiRequest::json(
                Endpoint::Analyze,
                json!({
                    "resumeText": resume_text,
                    "jobDescriptionText": job_description_text,
                    "jobDescriptionUrl": job_description_url,
                }),
            ),
        }
    }
}

/// Validates the input and builds an [`AnalysisRequest`].
///
/// Text inputs are trimmed. The job description is checked first, then the
/// resume source.
pub fn build_request(
    input: ResumeInput,
    job_description_text: &str,
    job_description_url: &str,
) -> Result<AnalysisRequest> {
    let job_description_text = job_description_text.trim().to_string();
    let job_description_url = job_description_url.trim().to_string();

    if job_description_text.is_empty() && job_description_url.is_empty() {
        return Err(ResumateError::validation(MISSING_JOB_DESCRIPTION));
    }

    if let Some(file) = input.file {
        return Ok(AnalysisRequest::File {
            file,
            job_description_text,
            job_description_url,
        });
    }

    let resume_text = input.text.as_deref().map(str::trim).unwrap_or_default();
    if resume_text.is_empty() {
        return Err(ResumateError::validation(MISSING_RESUME_TEXT));
    }

    Ok(AnalysisRequest::Text {
        resume_text: resume_text.to_string(),
        job_description_text,
        job_description_url,
    })
}

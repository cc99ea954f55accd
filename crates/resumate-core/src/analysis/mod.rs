//! Analysis domain module.
//!
//! # Module Structure
//!
//! - `model`: Result payload returned by the server (`AnalysisResult`)
//! - `file`: Validated resume uploads (`ResumeFile`)
//! - `builder`: Input validation and request building (`build_request`)

mod builder;
mod file;
mod model;

pub use builder::{
    AnalysisMode, AnalysisRequest, MISSING_JOB_DESCRIPTION, MISSING_RESUME_TEXT, ResumeInput,
    build_request,
};
pub use file::{PDF_MIME, ResumeFile, TEXT_MIME};
pub use model::AnalysisResult;

//! Loading resume uploads and text inputs from disk.

use std::path::Path;

use resumate_core::analysis::ResumeFile;
use resumate_core::error::{ResumateError, Result};

/// Guesses the MIME type from the file extension.
fn infer_mime_type(path: &Path) -> Option<String> {
    mime_guess::from_path(path)
        .first()
        .map(|mime| mime.essence_str().to_string())
}

/// Reads `path` and validates it as a resume upload.
pub async fn load_resume_file(path: &Path) -> Result<ResumeFile> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| ResumateError::validation(format!("'{}' is not a file", path.display())))?;
    let mime_type = infer_mime_type(path);

    let bytes = tokio::fs::read(path).await.map_err(|e| {
        ResumateError::io(format!("Failed to read '{}': {}", path.display(), e))
    })?;

    let file = ResumeFile::select(file_name, mime_type, bytes)?;
    tracing::debug!(
        "Loaded resume '{}' ({}, {})",
        file.file_name(),
        file.kind_label(),
        file.size_label()
    );
    Ok(file)
}

/// Reads a UTF-8 text input such as a pasted resume or job description.
pub async fn load_text(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| ResumateError::io(format!("Failed to read '{}': {}", path.display(), e)))
}

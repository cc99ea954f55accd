//! Resume file selection.
//!
//! Type checks run when a file is selected, so a [`ResumeFile`] is always a
//! PDF or plain-text upload.

use crate::error::{ResumateError, Result};

pub const PDF_MIME: &str = "application/pdf";
pub const TEXT_MIME: &str = "text/plain";

const ALLOWED_MIME_TYPES: [&str; 2] = [PDF_MIME, TEXT_MIME];
const ALLOWED_EXTENSIONS: [&str; 2] = [".pdf", ".txt"];

/// A validated resume upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeFile {
    file_name: String,
    mime_type: Option<String>,
    bytes: Vec<u8>,
}

impl ResumeFile {
    /// Validates and wraps a selected file.
    ///
    /// Accepted when either the MIME type is PDF/plain text or the file name
    /// ends in `.pdf`/`.txt` (case-insensitive).
    pub fn select(
        file_name: impl Into<String>,
        mime_type: Option<String>,
        bytes: Vec<u8>,
    ) -> Result<Self> {
        let file_name = file_name.into();
        let mime_ok = mime_type
            .as_deref()
            .is_some_and(|mime| ALLOWED_MIME_TYPES.contains(&mime));
        let lower = file_name.to_lowercase();
        let extension_ok = ALLOWED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext));

        if !mime_ok && !extension_ok {
            return Err(ResumateError::invalid_file_type(file_name));
        }

        Ok(Self {
            file_name,
            mime_type,
            bytes,
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_pdf(&self) -> bool {
        match self.mime_type.as_deref() {
            Some(mime) => mime == PDF_MIME,
            None => self.file_name.to_lowercase().ends_with(".pdf"),
        }
    }

    /// MIME type sent with the upload.
    pub fn content_type(&self) -> &str {
        match self.mime_type.as_deref() {
            Some(mime) if ALLOWED_MIME_TYPES.contains(&mime) => mime,
            _ if self.is_pdf() => PDF_MIME,
            _ => TEXT_MIME,
        }
    }

    /// Human-readable kind shown in previews.
    pub fn kind_label(&self) -> &'static str {
        if self.is_pdf() {
            "PDF Document"
        } else {
            "Text File"
        }
    }

    /// Size in kilobytes with one decimal, e.g. `"12.3 KB"`.
    pub fn size_label(&self) -> String {
        format!("{:.1} KB", self.bytes.len() as f64 / 1024.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_docx() {
        let err = ResumeFile::select("resume.docx", None, vec![1, 2]).unwrap_err();
        assert!(err.is_invalid_file_type());
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        let file = ResumeFile::select("resume.PDF", None, vec![0; 10]).unwrap();
        assert!(file.is_pdf());
        assert_eq!(file.content_type(), PDF_MIME);
    }

    #[test]
    fn test_mime_type_alone_is_enough() {
        let file = ResumeFile::select("resume", Some(TEXT_MIME.to_string()), Vec::new()).unwrap();
        assert_eq!(file.kind_label(), "Text File");
    }

    #[test]
    fn test_unknown_mime_with_valid_extension() {
        let file = ResumeFile::select(
            "cv.txt",
            Some("application/octet-stream".to_string()),
            b"hello".to_vec(),
        )
        .unwrap();
        assert_eq!(file.content_type(), TEXT_MIME);
    }

    #[test]
    fn test_preview_labels() {
        let file = ResumeFile::select("cv.pdf", Some(PDF_MIME.to_string()), vec![0; 2560]).unwrap();
        assert_eq!(file.kind_label(), "PDF Document");
        assert_eq!(file.size_label(), "2.5 KB");
    }
}

//! Document text and field extraction.
//!
//! `extract_text` turns a fetched payload into plain text according to
//! its detected format; `extract_fields` pattern-matches that text into
//! a structured lab report. Both are pure over their inputs and run on
//! the blocking pool when called from async workers.

mod docx;
mod fields;
mod pdf;

pub use fields::extract_fields;

use thiserror::Error;

use crate::utils::FileKind;

/// Errors from turning a payload into text.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),
    #[error("Invalid PDF: {0}")]
    Pdf(String),
    #[error("Invalid DOCX: {0}")]
    Docx(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Extract plain text from a payload of the given kind.
pub fn extract_text(payload: &[u8], kind: FileKind) -> Result<String, ExtractionError> {
    match kind {
        FileKind::Pdf => pdf::extract_text(payload),
        FileKind::Docx => docx::extract_text(payload),
        FileKind::Unknown => Err(ExtractionError::UnsupportedFileType(
            kind.as_str().to_string(),
        )),
    }
}

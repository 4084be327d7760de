//! Payload signature detection.

/// PDF file signature.
const PDF_MAGIC: &[u8] = b"%PDF";

/// ZIP container signature (DOCX is a ZIP archive).
const ZIP_MAGIC: &[u8] = b"PK";

/// Supported document formats, classified from leading payload bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Docx,
    Unknown,
}

impl FileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Pdf => "pdf",
            FileKind::Docx => "docx",
            FileKind::Unknown => "unknown",
        }
    }
}

/// Classify a payload by its magic bytes.
///
/// Total and pure: any payload not starting with the PDF or ZIP
/// signature is `Unknown`, including payloads shorter than the probes.
pub fn detect(payload: &[u8]) -> FileKind {
    if payload.starts_with(PDF_MAGIC) {
        FileKind::Pdf
    } else if payload.starts_with(ZIP_MAGIC) {
        FileKind::Docx
    } else {
        FileKind::Unknown
    }
}

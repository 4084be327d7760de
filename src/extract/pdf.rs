//! PDF text extraction.

use super::ExtractionError;

/// Extract text from an in-memory PDF payload.
///
/// Pages are concatenated in page order; a page with no extractable
/// text contributes nothing to the result. Image-only pages therefore
/// produce empty text, not an error. Only a malformed document fails.
pub(crate) fn extract_text(payload: &[u8]) -> Result<String, ExtractionError> {
    pdf_extract::extract_text_from_mem(payload).map_err(|e| ExtractionError::Pdf(e.to_string()))
}

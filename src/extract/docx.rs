//! DOCX text extraction.
//!
//! A DOCX file is a ZIP archive whose main text lives in
//! `word/document.xml` as WordprocessingML: `<w:t>` runs grouped under
//! `<w:p>` paragraphs. The namespace-heavy markup defeats HTML-oriented
//! parsers, so the scan matches the two tag shapes directly.

use std::io::{Cursor, Read};
use std::sync::LazyLock;

use regex::Regex;
use zip::ZipArchive;

use super::ExtractionError;

/// One paragraph: either self-closing (empty) or an open tag with body.
/// Attribute scans are lazy so a self-closing tag with attributes does
/// not swallow the following paragraph.
static PARAGRAPH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<w:p(?:\s[^>]*?)?(?:/>|>([\s\S]*?)</w:p>)").unwrap());

/// One text run inside a paragraph.
static RUN_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<w:t(?:\s[^>]*?)?>([\s\S]*?)</w:t>").unwrap());

/// Extract text from an in-memory DOCX payload.
///
/// Paragraph text is concatenated in document order, each paragraph
/// followed by a newline; runs within a paragraph join without
/// separators.
pub(crate) fn extract_text(payload: &[u8]) -> Result<String, ExtractionError> {
    let mut archive =
        ZipArchive::new(Cursor::new(payload)).map_err(|e| ExtractionError::Docx(e.to_string()))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| ExtractionError::Docx(e.to_string()))?
        .read_to_string(&mut xml)?;

    Ok(document_text(&xml))
}

/// Pull paragraph text out of WordprocessingML markup.
fn document_text(xml: &str) -> String {
    let mut text = String::new();
    for paragraph in PARAGRAPH.captures_iter(xml) {
        if let Some(body) = paragraph.get(1) {
            for run in RUN_TEXT.captures_iter(body.as_str()) {
                text.push_str(&unescape_entities(&run[1]));
            }
        }
        text.push('\n');
    }
    text
}

/// Decode the XML character entities DOCX emits for text content.
/// `&amp;` goes last so doubly-escaped input survives one level.
fn unescape_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

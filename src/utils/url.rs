//! Reference-cell sanitation.

/// Recover the document URL embedded in a raw reference cell.
///
/// Reference cells wrap the URL in a fixed-width decoration: eight
/// leading characters and a closing parenthesis. The rule is positional,
/// not structural. Anything without the trailing `)` or too short to
/// hold the prefix yields `None`. URL validity is not checked here; a
/// garbage substring surfaces later as a fetch error.
pub fn sanitize_reference(raw: Option<&str>) -> Option<String> {
    let raw = raw?;
    if !raw.ends_with(')') {
        return None;
    }
    // Offsets are in characters, so walk the first eight rather than
    // slicing bytes. Fewer than nine characters means no embedded URL.
    let start = raw.char_indices().nth(8).map(|(i, _)| i)?;
    let end = raw.len() - ')'.len_utf8();
    if start > end {
        return None;
    }
    Some(raw[start..end].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_none() {
        assert_eq!(sanitize_reference(None), None);
    }

    #[test]
    fn test_sanitize_too_short() {
        assert_eq!(sanitize_reference(Some("")), None);
        assert_eq!(sanitize_reference(Some("short)")), None);
        assert_eq!(sanitize_reference(Some("12345678")), None);
    }

    #[test]
    fn test_sanitize_missing_paren() {
        assert_eq!(sanitize_reference(Some("ab######https://example.com/x")), None);
    }

    #[test]
    fn test_sanitize_strips_decoration() {
        let raw = "ab######https://example.com/report.pdf)";
        assert_eq!(
            sanitize_reference(Some(raw)),
            Some("https://example.com/report.pdf".to_string())
        );
    }

    #[test]
    fn test_sanitize_matches_slice_rule() {
        let raw = "website (https://data.ct.gov/doc/123)";
        let expected = &raw[8..raw.len() - 1];
        assert_eq!(sanitize_reference(Some(raw)), Some(expected.to_string()));
    }

    #[test]
    fn test_sanitize_nine_chars_is_empty() {
        // Exactly one character of decoration after the prefix: the
        // embedded URL is the empty string, which the row processor
        // treats as invalid.
        assert_eq!(sanitize_reference(Some("12345678)")), Some(String::new()));
    }

    #[test]
    fn test_sanitize_idempotent_on_output_shape() {
        let raw = "ab######https://example.com/a)";
        let once = sanitize_reference(Some(raw)).unwrap();
        // Sanitizing a bare URL (no trailing paren) yields None, so the
        // rule never double-strips.
        assert_eq!(sanitize_reference(Some(&once)), None);
    }
}

//! Field extraction patterns for certificates of analysis.
//!
//! Every field is independent: one pattern per output column, applied
//! to the full document text with no cross-field conflict resolution.
//! New columns are added by extending a table; the orchestration never
//! changes.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{LabReport, PassFail, LAB_UNKNOWN};

/// Known lab markers in precedence order, with display names. Matching
/// is a case-insensitive substring search; the first marker found wins.
const LAB_MARKERS: [(&str, &str); 3] = [
    ("alta", "Alta Sci"),
    ("analytics", "Analytics Labs"),
    ("northeast", "Northeast Labs"),
];

/// Concentration/activity patterns: labeled keyword, non-greedy
/// single-line gap, decimal number, unit. The capture parses as a
/// float. The keyword ends at a word boundary, so `THCa 18.20 %` and
/// `THCa: 18.20 %` both match while `THCartridge` does not.
static NUMERIC_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        (Regex::new(r"THCa\b.*?(\d+\.\d+)\s*%").unwrap(), "thca"),
        (Regex::new(r"Δ9\s*THC\b.*?(\d+\.\d+)\s*%").unwrap(), "thc"),
        (Regex::new(r"CBD\b.*?(\d+\.\d+)\s*%").unwrap(), "cbd"),
        (Regex::new(r"Moisture\b.*?(\d+\.\d+)\s*%").unwrap(), "moisture"),
        (
            Regex::new(r"Water\s*Activity\b.*?(\d+\.\d+)\s*aw").unwrap(),
            "water_activity",
        ),
    ]
});

/// Verbatim-capture patterns: dates keep their `MM/DD/YYYY` shape
/// unparsed; the method ID is one alphanumeric token.
static TEXT_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        (
            Regex::new(r"Completed:\s*(\d{2}/\d{2}/\d{4})").unwrap(),
            "test_completed",
        ),
        (
            Regex::new(r"Expiration:\s*(\d{2}/\d{2}/\d{4})").unwrap(),
            "sample_expiration",
        ),
        (
            Regex::new(r"Instrument\s*ID:\s*(\w+)").unwrap(),
            "method_id",
        ),
    ]
});

/// Panel verdict patterns: the literal token `Pass` anywhere forward of
/// the keyword is a pass, anything else a fail. The forward search is
/// unbounded across lines; the mycotoxins check ignores case and the
/// pesticides keyword accepts a misspelling seen in real certificates.
static PASS_FAIL_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        (
            Regex::new(r"Microbials?\s*[\S\s]*?Pass").unwrap(),
            "microbial",
        ),
        (
            Regex::new(r"(?i)Mycotoxins?\s*[\S\s]*?Pass").unwrap(),
            "mycotoxins",
        ),
        (
            Regex::new(r"(?:Pesticides?|Pesticids?)\s*[\S\s]*?Pass").unwrap(),
            "pesticides",
        ),
        (
            Regex::new(r"Heavy\s*Metals?\s*[\S\s]*?Pass").unwrap(),
            "heavy_metals",
        ),
    ]
});

/// Apply the full pattern battery to document text.
///
/// Numeric and date fields are `None` when their pattern finds nothing;
/// panel verdicts are always present (forced binary).
pub fn extract_fields(text: &str) -> LabReport {
    let mut report = LabReport::with_lab(detect_lab(text));

    for (pattern, field) in NUMERIC_PATTERNS.iter() {
        let value = capture_float(pattern, text);
        match *field {
            "thca" => report.thca = value,
            "thc" => report.thc = value,
            "cbd" => report.cbd = value,
            "moisture" => report.moisture = value,
            "water_activity" => report.water_activity = value,
            _ => {}
        }
    }

    for (pattern, field) in TEXT_PATTERNS.iter() {
        let value = capture_text(pattern, text);
        match *field {
            "test_completed" => report.test_completed = value,
            "sample_expiration" => report.sample_expiration = value,
            "method_id" => report.method_id = value,
            _ => {}
        }
    }

    for (pattern, field) in PASS_FAIL_PATTERNS.iter() {
        let verdict = Some(PassFail::from_match(pattern.is_match(text)));
        match *field {
            "microbial" => report.microbial = verdict,
            "mycotoxins" => report.mycotoxins = verdict,
            "pesticides" => report.pesticides = verdict,
            "heavy_metals" => report.heavy_metals = verdict,
            _ => {}
        }
    }

    report
}

/// Identify the issuing lab from its marker.
fn detect_lab(text: &str) -> &'static str {
    let lowered = text.to_lowercase();
    for (marker, name) in LAB_MARKERS {
        if lowered.contains(marker) {
            return name;
        }
    }
    LAB_UNKNOWN
}

fn capture_float(pattern: &Regex, text: &str) -> Option<f64> {
    pattern.captures(text)?.get(1)?.as_str().parse().ok()
}

fn capture_text(pattern: &Regex, text: &str) -> Option<String> {
    Some(pattern.captures(text)?.get(1)?.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thca_plain() {
        let report = extract_fields("Cannabinoids THCa 18.20 % by weight");
        assert_eq!(report.thca, Some(18.20));
    }

    #[test]
    fn test_thca_with_colon_gap() {
        let report = extract_fields("THCa: content 23.45 %");
        assert_eq!(report.thca, Some(23.45));
    }

    #[test]
    fn test_thca_keyword_boundary() {
        let report = extract_fields("THCartridge 99.99 %");
        assert_eq!(report.thca, None);
    }

    #[test]
    fn test_thc_requires_delta_marker() {
        let report = extract_fields("THCa 18.20 %");
        assert_eq!(report.thc, None);

        let report = extract_fields("Δ9 THC 22.10 %");
        assert_eq!(report.thc, Some(22.10));
    }

    #[test]
    fn test_numeric_requires_decimal() {
        let report = extract_fields("THCa 18 %");
        assert_eq!(report.thca, None);
    }

    #[test]
    fn test_numeric_gap_stays_on_one_line() {
        let report = extract_fields("THCa result\n18.20 %");
        assert_eq!(report.thca, None);
    }

    #[test]
    fn test_water_activity_unit() {
        let report = extract_fields("Water Activity 0.55 aw");
        assert_eq!(report.water_activity, Some(0.55));

        // Percent suffix belongs to the concentration fields only.
        let report = extract_fields("Water Activity 0.55 %");
        assert_eq!(report.water_activity, None);
    }

    #[test]
    fn test_moisture() {
        let report = extract_fields("Moisture 11.20 %");
        assert_eq!(report.moisture, Some(11.20));
    }

    #[test]
    fn test_completion_date_verbatim() {
        let report = extract_fields("Analysis Completed: 01/02/2023 at the lab");
        assert_eq!(report.test_completed.as_deref(), Some("01/02/2023"));
    }

    #[test]
    fn test_expiration_date_verbatim() {
        let report = extract_fields("Expiration: 12/31/2025");
        assert_eq!(report.sample_expiration.as_deref(), Some("12/31/2025"));
    }

    #[test]
    fn test_method_id_token() {
        let report = extract_fields("Instrument ID: HPLC42 (method B)");
        assert_eq!(report.method_id.as_deref(), Some("HPLC42"));
    }

    #[test]
    fn test_pass_fail_never_absent() {
        let report = extract_fields("");
        assert_eq!(report.microbial, Some(PassFail::Fail));
        assert_eq!(report.mycotoxins, Some(PassFail::Fail));
        assert_eq!(report.pesticides, Some(PassFail::Fail));
        assert_eq!(report.heavy_metals, Some(PassFail::Fail));

        let report = extract_fields("completely unrelated text");
        assert_eq!(report.microbial, Some(PassFail::Fail));
    }

    #[test]
    fn test_pass_search_spans_lines() {
        let text = "Microbials\nSalmonella: Absent\nE. coli: Absent\nResult: Pass";
        let report = extract_fields(text);
        assert_eq!(report.microbial, Some(PassFail::Pass));
    }

    #[test]
    fn test_microbial_keyword_is_case_sensitive() {
        let report = extract_fields("microbials screen Pass");
        assert_eq!(report.microbial, Some(PassFail::Fail));
    }

    #[test]
    fn test_mycotoxins_ignores_case() {
        let report = extract_fields("MYCOTOXINS panel pass");
        assert_eq!(report.mycotoxins, Some(PassFail::Pass));
    }

    #[test]
    fn test_pesticides_misspelling() {
        let report = extract_fields("Pesticids residue screen Pass");
        assert_eq!(report.pesticides, Some(PassFail::Pass));
    }

    #[test]
    fn test_heavy_metals() {
        let report = extract_fields("Heavy Metals analysis Pass");
        assert_eq!(report.heavy_metals, Some(PassFail::Pass));
    }

    #[test]
    fn test_lab_precedence() {
        // Alta wins even when another marker appears first in the text.
        let report = extract_fields("Northeast Labs on behalf of AltaSci Laboratories");
        assert_eq!(report.lab_name, "Alta Sci");
    }

    #[test]
    fn test_lab_marker_ignores_case() {
        let report = extract_fields("ALTASCI LLC certificate");
        assert_eq!(report.lab_name, "Alta Sci");

        let report = extract_fields("analytics labs report");
        assert_eq!(report.lab_name, "Analytics Labs");
    }

    #[test]
    fn test_lab_unknown() {
        let report = extract_fields("Some Other Lab LLC");
        assert_eq!(report.lab_name, LAB_UNKNOWN);
    }

    #[test]
    fn test_fields_are_independent() {
        let report = extract_fields("CBD 0.31 %");
        assert_eq!(report.cbd, Some(0.31));
        assert_eq!(report.thca, None);
        assert_eq!(report.thc, None);
        assert_eq!(report.test_completed, None);
        assert_eq!(report.method_id, None);
    }

    #[test]
    fn test_full_certificate_text() {
        let text = "Northeast Labs\n\
                    Certificate of Analysis\n\
                    THCa 18.20 % Δ9 THC 0.80 % CBD 0.31 %\n\
                    Moisture 11.20 % Water Activity 0.55 aw\n\
                    Completed: 03/15/2024 Expiration: 03/15/2025\n\
                    Microbials Absent Pass\n\
                    Mycotoxins None Detected Pass\n\
                    Pesticides None Detected Pass\n\
                    Heavy Metals None Detected Pass\n\
                    Instrument ID: LC2030";
        let report = extract_fields(text);

        assert_eq!(report.lab_name, "Northeast Labs");
        assert_eq!(report.thca, Some(18.20));
        assert_eq!(report.thc, Some(0.80));
        assert_eq!(report.cbd, Some(0.31));
        assert_eq!(report.moisture, Some(11.20));
        assert_eq!(report.water_activity, Some(0.55));
        assert_eq!(report.test_completed.as_deref(), Some("03/15/2024"));
        assert_eq!(report.sample_expiration.as_deref(), Some("03/15/2025"));
        assert_eq!(report.microbial, Some(PassFail::Pass));
        assert_eq!(report.mycotoxins, Some(PassFail::Pass));
        assert_eq!(report.pesticides, Some(PassFail::Pass));
        assert_eq!(report.heavy_metals, Some(PassFail::Pass));
        assert_eq!(report.method_id.as_deref(), Some("LC2030"));
    }
}

//! Extracted lab-report fields and their output columns.

use serde::Serialize;

/// Lab name written when the reference cell held no usable URL.
pub const LAB_INVALID_URL: &str = "Invalid URL";

/// Lab name written when the payload matched no supported signature.
pub const LAB_UNSUPPORTED: &str = "Unsupported file type";

/// Lab name written when fetch or extraction failed.
pub const LAB_ERROR: &str = "Error";

/// Lab name written when no known lab marker appears in the text.
pub const LAB_UNKNOWN: &str = "Unknown";

/// Columns appended to the source dataset's header, in output order.
pub const REPORT_COLUMNS: [&str; 13] = [
    "Lab Name",
    "THCa (%)",
    "THC (%)",
    "CBD (%)",
    "Moisture (%)",
    "Water Activity (aw)",
    "Test Completion Date",
    "Sample Expiration Date",
    "Microbial Pass/Fail",
    "Mycotoxins Pass/Fail",
    "Pesticides Pass/Fail",
    "Heavy Metals Pass/Fail",
    "Method ID",
];

/// Pass/fail verdict for a test panel.
///
/// The extractor forces a binary classification: a panel either shows a
/// passing sequence or it does not. Only sentinel rows leave a panel
/// column empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PassFail {
    Pass,
    Fail,
}

impl PassFail {
    pub fn as_str(&self) -> &'static str {
        match self {
            PassFail::Pass => "Pass",
            PassFail::Fail => "Fail",
        }
    }

    /// Classify a pattern-match result.
    pub fn from_match(matched: bool) -> Self {
        if matched {
            PassFail::Pass
        } else {
            PassFail::Fail
        }
    }
}

/// Fields extracted from one certificate of analysis.
///
/// Every field except `lab_name` is optional: numeric and date fields
/// are absent when their pattern does not match, and all fields are
/// absent on sentinel rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabReport {
    /// Recognized lab, `Unknown`, or a failure sentinel.
    pub lab_name: String,
    /// THCa concentration in percent.
    pub thca: Option<f64>,
    /// Delta-9 THC concentration in percent.
    pub thc: Option<f64>,
    /// CBD concentration in percent.
    pub cbd: Option<f64>,
    /// Moisture content in percent.
    pub moisture: Option<f64>,
    /// Water activity in aw.
    pub water_activity: Option<f64>,
    /// Test completion date, verbatim `MM/DD/YYYY`.
    pub test_completed: Option<String>,
    /// Sample expiration date, verbatim `MM/DD/YYYY`.
    pub sample_expiration: Option<String>,
    /// Microbial panel verdict.
    pub microbial: Option<PassFail>,
    /// Mycotoxins panel verdict.
    pub mycotoxins: Option<PassFail>,
    /// Pesticides panel verdict.
    pub pesticides: Option<PassFail>,
    /// Heavy metals panel verdict.
    pub heavy_metals: Option<PassFail>,
    /// Instrument/method identifier.
    pub method_id: Option<String>,
}

impl LabReport {
    /// Create a report with the given lab name and every field absent.
    ///
    /// Sentinel rows use this directly; the field extractor starts from
    /// it and fills in whatever its patterns match.
    pub fn with_lab(lab_name: impl Into<String>) -> Self {
        Self {
            lab_name: lab_name.into(),
            thca: None,
            thc: None,
            cbd: None,
            moisture: None,
            water_activity: None,
            test_completed: None,
            sample_expiration: None,
            microbial: None,
            mycotoxins: None,
            pesticides: None,
            heavy_metals: None,
            method_id: None,
        }
    }

    /// Serialize to CSV cells in `REPORT_COLUMNS` order.
    ///
    /// Absent values become empty cells.
    pub fn csv_cells(&self) -> Vec<String> {
        fn float_cell(value: Option<f64>) -> String {
            value.map(|v| v.to_string()).unwrap_or_default()
        }
        fn text_cell(value: Option<&String>) -> String {
            value.cloned().unwrap_or_default()
        }
        fn verdict_cell(value: Option<PassFail>) -> String {
            value.map(|v| v.as_str().to_string()).unwrap_or_default()
        }

        vec![
            self.lab_name.clone(),
            float_cell(self.thca),
            float_cell(self.thc),
            float_cell(self.cbd),
            float_cell(self.moisture),
            float_cell(self.water_activity),
            text_cell(self.test_completed.as_ref()),
            text_cell(self.sample_expiration.as_ref()),
            verdict_cell(self.microbial),
            verdict_cell(self.mycotoxins),
            verdict_cell(self.pesticides),
            verdict_cell(self.heavy_metals),
            text_cell(self.method_id.as_ref()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_report_is_empty() {
        let report = LabReport::with_lab(LAB_INVALID_URL);
        let cells = report.csv_cells();
        assert_eq!(cells.len(), REPORT_COLUMNS.len());
        assert_eq!(cells[0], "Invalid URL");
        assert!(cells[1..].iter().all(|c| c.is_empty()));
    }

    #[test]
    fn test_csv_cells_order_matches_columns() {
        let mut report = LabReport::with_lab("Northeast Labs");
        report.thca = Some(18.20);
        report.water_activity = Some(0.55);
        report.test_completed = Some("03/15/2024".to_string());
        report.microbial = Some(PassFail::Pass);
        report.heavy_metals = Some(PassFail::Fail);
        report.method_id = Some("HPLC42".to_string());

        let cells = report.csv_cells();
        assert_eq!(cells[0], "Northeast Labs");
        // Floats render without trailing zeros.
        assert_eq!(cells[1], "18.2");
        assert_eq!(cells[5], "0.55");
        assert_eq!(cells[6], "03/15/2024");
        assert_eq!(cells[8], "Pass");
        assert_eq!(cells[11], "Fail");
        assert_eq!(cells[12], "HPLC42");
    }

    #[test]
    fn test_pass_fail_from_match() {
        assert_eq!(PassFail::from_match(true), PassFail::Pass);
        assert_eq!(PassFail::from_match(false), PassFail::Fail);
        assert_eq!(PassFail::Pass.as_str(), "Pass");
        assert_eq!(PassFail::Fail.as_str(), "Fail");
    }
}

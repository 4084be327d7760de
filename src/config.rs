//! Runtime settings for coacquire.

use std::path::PathBuf;

/// Published registry export fetched when no local input is given.
pub const DEFAULT_DATASET_URL: &str =
    "https://data.ct.gov/api/views/egd5-wb6r/rows.csv?accessType=DOWNLOAD";

/// Dataset column holding the decorated lab document reference.
pub const DEFAULT_REFERENCE_COLUMN: &str = "LAB-ANALYSIS";

/// Enriched CSV written into the working directory.
pub const DEFAULT_OUTPUT_FILENAME: &str = "updated_dataset_with_extracted_data.csv";

/// Application settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Where to fetch the source dataset when no input file is given.
    pub dataset_url: String,
    /// Header of the column carrying the document reference.
    pub reference_column: String,
    /// Path of the enriched output CSV.
    pub output_path: PathBuf,
    /// User agent for HTTP requests.
    pub user_agent: String,
    /// Request timeout in seconds.
    pub request_timeout: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            dataset_url: DEFAULT_DATASET_URL.to_string(),
            reference_column: DEFAULT_REFERENCE_COLUMN.to_string(),
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILENAME),
            user_agent: "coacquire/0.3 (academic research)".to_string(),
            request_timeout: 30,
        }
    }
}

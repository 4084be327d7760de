//! Enrichment service types and events.

use std::time::Duration;

use crate::models::{LAB_ERROR, LAB_INVALID_URL, LAB_UNSUPPORTED};

/// Events emitted during an enrichment run.
#[derive(Debug, Clone)]
pub enum EnrichEvent {
    /// A worker picked up a record
    Started { worker_id: usize, index: usize },
    /// A record finished and its row was queued for the sink
    Completed {
        worker_id: usize,
        index: usize,
        outcome: RecordOutcome,
        lab_name: String,
    },
    /// Fetch or extraction failed; a sentinel row was queued instead
    Failed {
        worker_id: usize,
        index: usize,
        url: String,
        error: String,
    },
}

/// How a record's output row was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Document fetched and fields extracted
    Extracted,
    /// No usable URL in the reference cell
    InvalidUrl,
    /// Fetched body was neither PDF nor DOCX
    UnsupportedType,
    /// Fetch or extraction error
    Errored,
}

impl RecordOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordOutcome::Extracted => "extracted",
            RecordOutcome::InvalidUrl => "invalid_url",
            RecordOutcome::UnsupportedType => "unsupported_type",
            RecordOutcome::Errored => "errored",
        }
    }
}

/// Why a record could not be enriched from its document.
///
/// Failures here are data, not control flow: each maps to a sentinel
/// lab name and an otherwise empty row, and the run keeps going.
#[derive(Debug)]
pub enum RowFailure {
    /// Reference cell missing or unusable after sanitizing
    InvalidUrl,
    /// Body fetched but not a recognized document format
    UnsupportedType { url: String },
    /// Network, status, or text extraction error
    Failed { url: String, error: String },
}

impl RowFailure {
    /// Sentinel written to the Lab Name column for this failure.
    pub fn sentinel(&self) -> &'static str {
        match self {
            RowFailure::InvalidUrl => LAB_INVALID_URL,
            RowFailure::UnsupportedType { .. } => LAB_UNSUPPORTED,
            RowFailure::Failed { .. } => LAB_ERROR,
        }
    }

    /// Outcome tag for events and run tallies.
    pub fn outcome(&self) -> RecordOutcome {
        match self {
            RowFailure::InvalidUrl => RecordOutcome::InvalidUrl,
            RowFailure::UnsupportedType { .. } => RecordOutcome::UnsupportedType,
            RowFailure::Failed { .. } => RecordOutcome::Errored,
        }
    }
}

/// Result of an enrichment run.
#[derive(Debug, Default)]
pub struct EnrichResult {
    pub processed: usize,
    pub extracted: usize,
    pub unknown_labs: usize,
    pub invalid_urls: usize,
    pub unsupported: usize,
    pub errors: usize,
}

/// Configuration for the enrichment service.
pub struct EnrichConfig {
    pub workers: usize,
    pub request_timeout: Duration,
    pub user_agent: String,
}

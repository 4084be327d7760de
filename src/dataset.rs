//! Source dataset loading and the enriched output sink.

use std::fs::File;
use std::path::Path;

use anyhow::Context;

use crate::models::{InputRecord, LabReport, REPORT_COLUMNS};

/// A parsed source dataset: header row plus immutable records.
#[derive(Debug)]
pub struct Dataset {
    pub headers: Vec<String>,
    pub records: Vec<InputRecord>,
}

impl Dataset {
    /// Parse CSV bytes, pulling each record's reference from the named
    /// column.
    ///
    /// A missing reference column is fatal. Ragged rows are tolerated
    /// and aligned to the header width: a short row reads as empty
    /// cells and a long row drops its unlabeled tail, so appended
    /// report cells always land under their own columns.
    pub fn from_csv(bytes: &[u8], reference_column: &str) -> anyhow::Result<Self> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(bytes);

        let headers: Vec<String> = reader
            .headers()
            .context("reading dataset header")?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let reference_index = headers
            .iter()
            .position(|h| h == reference_column)
            .with_context(|| {
                format!(
                    "column '{}' not found in dataset (available: {})",
                    reference_column,
                    headers.join(", ")
                )
            })?;

        let mut records = Vec::new();
        for (index, row) in reader.records().enumerate() {
            let row = row.with_context(|| format!("reading dataset record {}", index))?;
            let mut fields: Vec<String> = row.iter().map(|cell| cell.to_string()).collect();
            // Ragged rows pad or trim to the header width
            fields.resize(headers.len(), String::new());
            let reference = fields
                .get(reference_index)
                .filter(|cell| !cell.is_empty())
                .cloned();
            records.push(InputRecord::new(index, fields, reference));
        }

        Ok(Self { headers, records })
    }

    /// Load a dataset from a CSV file on disk.
    pub fn from_path(path: &Path, reference_column: &str) -> anyhow::Result<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        Self::from_csv(&bytes, reference_column)
    }
}

/// Append-only writer for the enriched output CSV.
///
/// The header goes out at creation time. After that the sink only
/// appends, one flushed row per call, so partial output survives an
/// interrupted run.
pub struct CsvSink {
    writer: csv::Writer<File>,
}

impl CsvSink {
    /// Create the output file and write the combined header row: the
    /// source columns followed by the report columns.
    pub fn create(path: &Path, input_headers: &[String]) -> anyhow::Result<Self> {
        let file =
            File::create(path).with_context(|| format!("creating {}", path.display()))?;
        let mut writer = csv::WriterBuilder::new().flexible(true).from_writer(file);

        let header: Vec<&str> = input_headers
            .iter()
            .map(|h| h.as_str())
            .chain(REPORT_COLUMNS.iter().copied())
            .collect();
        writer
            .write_record(&header)
            .context("writing output header")?;
        writer.flush().context("flushing output header")?;

        Ok(Self { writer })
    }

    /// Append one enriched row: the record's raw cells followed by
    /// the report cells, flushed immediately.
    pub fn append(&mut self, fields: &[String], report: &LabReport) -> anyhow::Result<()> {
        let cells = report.csv_cells();
        let row: Vec<&str> = fields
            .iter()
            .map(|f| f.as_str())
            .chain(cells.iter().map(|c| c.as_str()))
            .collect();
        self.writer
            .write_record(&row)
            .context("writing output row")?;
        self.writer.flush().context("flushing output row")?;
        Ok(())
    }
}

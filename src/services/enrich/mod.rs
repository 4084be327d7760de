//! Record enrichment service.
//!
//! Fetches each record's lab document, extracts report fields from it,
//! and streams one output row per input record in completion order.
//! Separated from UI concerns - emits events for progress tracking.

mod types;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::dataset::CsvSink;
use crate::extract::{extract_fields, extract_text, ExtractionError};
use crate::models::{InputRecord, LabReport, LAB_UNKNOWN};
use crate::services::HttpClient;
use crate::utils::{detect, sanitize_reference, FileKind};

use types::RowFailure;
pub use types::{EnrichConfig, EnrichEvent, EnrichResult, RecordOutcome};

/// Row ready for the sink, tagged with its source record.
struct RowMessage {
    index: usize,
    report: LabReport,
    outcome: RecordOutcome,
}

/// Service that drives the fetch/extract/write pipeline.
pub struct EnrichService {
    config: EnrichConfig,
}

impl EnrichService {
    /// Create a new enrichment service.
    pub fn new(config: EnrichConfig) -> Self {
        Self { config }
    }

    /// Enrich every record and stream its row to the sink.
    ///
    /// Exactly one row leaves per input record, in completion order.
    /// Per-record failures become sentinel rows; only sink and task
    /// faults abort the run.
    pub async fn enrich(
        &self,
        records: Arc<[InputRecord]>,
        sink: CsvSink,
        event_tx: mpsc::Sender<EnrichEvent>,
    ) -> anyhow::Result<EnrichResult> {
        let client = HttpClient::new(&self.config.user_agent, self.config.request_timeout)?;

        let (row_tx, row_rx) = mpsc::channel::<RowMessage>(100);
        let writer = tokio::spawn(write_rows(sink, records.clone(), row_rx));

        let next = Arc::new(AtomicUsize::new(0));
        let mut handles = Vec::with_capacity(self.config.workers);

        for worker_id in 0..self.config.workers {
            let client = client.clone();
            let records = records.clone();
            let next = next.clone();
            let row_tx = row_tx.clone();
            let event_tx = event_tx.clone();

            let handle = tokio::spawn(async move {
                loop {
                    // Claim a record to process
                    let index = next.fetch_add(1, Ordering::Relaxed);
                    let Some(record) = records.get(index) else {
                        break;
                    };

                    let _ = event_tx
                        .send(EnrichEvent::Started { worker_id, index })
                        .await;

                    match process_record(&client, record).await {
                        Ok(report) => {
                            let lab_name = report.lab_name.clone();
                            let queued = row_tx
                                .send(RowMessage {
                                    index,
                                    report,
                                    outcome: RecordOutcome::Extracted,
                                })
                                .await;
                            if queued.is_err() {
                                break;
                            }
                            let _ = event_tx
                                .send(EnrichEvent::Completed {
                                    worker_id,
                                    index,
                                    outcome: RecordOutcome::Extracted,
                                    lab_name,
                                })
                                .await;
                        }
                        Err(failure) => {
                            let outcome = failure.outcome();
                            let report = LabReport::with_lab(failure.sentinel());
                            let queued = row_tx
                                .send(RowMessage {
                                    index,
                                    report,
                                    outcome,
                                })
                                .await;
                            if queued.is_err() {
                                break;
                            }

                            match failure {
                                RowFailure::Failed { url, error } => {
                                    tracing::warn!(
                                        "Record {} failed: {} ({})",
                                        index,
                                        error,
                                        url
                                    );
                                    let _ = event_tx
                                        .send(EnrichEvent::Failed {
                                            worker_id,
                                            index,
                                            url,
                                            error,
                                        })
                                        .await;
                                }
                                other => {
                                    let _ = event_tx
                                        .send(EnrichEvent::Completed {
                                            worker_id,
                                            index,
                                            outcome,
                                            lab_name: other.sentinel().to_string(),
                                        })
                                        .await;
                                }
                            }
                        }
                    }
                }
            });

            handles.push(handle);
        }

        // Workers hold their own clones
        drop(row_tx);

        // Wait for all workers
        for handle in handles {
            if let Err(e) = handle.await {
                tracing::error!("Enrichment worker failed: {}", e);
            }
        }

        let result = match writer.await {
            Ok(tallies) => tallies?,
            Err(e) => anyhow::bail!("row writer task failed: {}", e),
        };

        Ok(result)
    }
}

/// Run one record through sanitize, fetch, detect, and extract.
///
/// Never aborts the run: every failure mode collapses into a
/// [`RowFailure`] that the caller turns into a sentinel row.
async fn process_record(
    client: &HttpClient,
    record: &InputRecord,
) -> Result<LabReport, RowFailure> {
    let url = match sanitize_reference(record.reference.as_deref()) {
        Some(url) if !url.is_empty() => url,
        _ => return Err(RowFailure::InvalidUrl),
    };

    let payload = client
        .fetch_bytes(&url)
        .await
        .map_err(|e| RowFailure::Failed {
            url: url.clone(),
            error: e.to_string(),
        })?;

    let kind = detect(&payload);
    if kind == FileKind::Unknown {
        return Err(RowFailure::UnsupportedType { url });
    }

    // Parsing is CPU bound; keep it off the async workers.
    let parsed = tokio::task::spawn_blocking(move || {
        let text = extract_text(&payload, kind)?;
        Ok::<LabReport, ExtractionError>(extract_fields(&text))
    })
    .await;

    match parsed {
        Ok(Ok(report)) => Ok(report),
        Ok(Err(e)) => Err(RowFailure::Failed {
            url,
            error: e.to_string(),
        }),
        Err(e) => {
            tracing::error!("Extraction task panicked for {}: {}", url, e);
            Err(RowFailure::Failed {
                url,
                error: e.to_string(),
            })
        }
    }
}

/// Single writer over the row channel.
///
/// Owning the sink here keeps appends serialized without a lock, no
/// matter how many workers feed it.
async fn write_rows(
    mut sink: CsvSink,
    records: Arc<[InputRecord]>,
    mut rows: mpsc::Receiver<RowMessage>,
) -> anyhow::Result<EnrichResult> {
    let mut result = EnrichResult::default();

    while let Some(row) = rows.recv().await {
        let record = &records[row.index];
        sink.append(&record.fields, &row.report)?;

        result.processed += 1;
        match row.outcome {
            RecordOutcome::Extracted => {
                result.extracted += 1;
                if row.report.lab_name == LAB_UNKNOWN {
                    result.unknown_labs += 1;
                }
            }
            RecordOutcome::InvalidUrl => result.invalid_urls += 1,
            RecordOutcome::UnsupportedType => result.unsupported += 1,
            RecordOutcome::Errored => result.errors += 1,
        }
    }

    Ok(result)
}

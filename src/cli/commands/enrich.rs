//! Enrich a registry dataset with extracted lab report fields.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::Settings;
use crate::dataset::{CsvSink, Dataset};
use crate::models::InputRecord;

/// Run the full fetch/extract/write pipeline over a dataset.
#[allow(clippy::too_many_arguments)]
pub async fn cmd_enrich(
    settings: &Settings,
    input: Option<&Path>,
    url: Option<&str>,
    output: Option<&Path>,
    column: Option<&str>,
    workers: usize,
    limit: usize,
) -> anyhow::Result<()> {
    use crate::services::{EnrichConfig, EnrichEvent, EnrichService, HttpClient, RecordOutcome};
    use tokio::sync::mpsc;

    let reference_column = column.unwrap_or(&settings.reference_column);
    let output_path = output.unwrap_or(&settings.output_path);
    let request_timeout = Duration::from_secs(settings.request_timeout);
    // A pool of zero workers would write the header and nothing else
    let workers = workers.max(1);

    // Load the dataset; records stay immutable from here on
    let mut dataset = if let Some(path) = input {
        println!(
            "{} Loading dataset from {}",
            style("→").cyan(),
            path.display()
        );
        Dataset::from_path(path, reference_column)?
    } else {
        let dataset_url = url.unwrap_or(&settings.dataset_url);
        url::Url::parse(dataset_url)
            .with_context(|| format!("invalid dataset URL: {}", dataset_url))?;

        println!(
            "{} Fetching dataset from {}",
            style("→").cyan(),
            dataset_url
        );
        let client = HttpClient::new(&settings.user_agent, request_timeout)?;
        let bytes = client
            .fetch_bytes(dataset_url)
            .await
            .with_context(|| format!("fetching dataset from {}", dataset_url))?;
        Dataset::from_csv(&bytes, reference_column)?
    };

    if limit > 0 && dataset.records.len() > limit {
        dataset.records.truncate(limit);
    }

    tracing::info!(
        "Loaded dataset: {} records, reference column '{}'",
        dataset.records.len(),
        reference_column
    );

    // Header goes out even when there is nothing to process
    let sink = CsvSink::create(output_path, &dataset.headers)?;

    if dataset.records.is_empty() {
        println!("{} Dataset has no records", style("!").yellow());
        return Ok(());
    }

    let total = dataset.records.len();
    println!(
        "{} Starting {} enrichment workers ({} records)",
        style("→").cyan(),
        workers,
        total
    );

    let records: Arc<[InputRecord]> = dataset.records.into();

    let service = EnrichService::new(EnrichConfig {
        workers,
        request_timeout,
        user_agent: settings.user_agent.clone(),
    });

    // Event channel for progress updates
    let (event_tx, mut event_rx) = mpsc::channel::<EnrichEvent>(100);

    // Progress bar (UI concern)
    let progress = ProgressBar::new(total as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec}) {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    // Spawn event handler task (UI layer)
    let pb = progress.clone();
    let event_handler = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            match event {
                EnrichEvent::Started { .. } => {}
                EnrichEvent::Completed {
                    outcome, lab_name, ..
                } => {
                    if outcome == RecordOutcome::Extracted {
                        pb.set_message(lab_name);
                    }
                    pb.inc(1);
                }
                EnrichEvent::Failed {
                    index, url, error, ..
                } => {
                    pb.println(format!(
                        "{} Record {} failed: {} ({})",
                        style("✗").red(),
                        index,
                        error,
                        url
                    ));
                    pb.inc(1);
                }
            }
        }
    });

    // Run enrichment service (business logic)
    let result = service.enrich(records, sink, event_tx).await?;

    // Wait for event handler to finish
    if let Err(e) = event_handler.await {
        tracing::warn!("Event handler task failed: {}", e);
    }

    progress.finish_with_message("done");

    // Print results (UI layer)
    println!(
        "{} Wrote {} rows to {}",
        style("✓").green(),
        result.processed,
        output_path.display()
    );

    if result.extracted > 0 {
        println!(
            "  {} {} documents parsed ({} from unrecognized labs)",
            style("→").dim(),
            result.extracted,
            result.unknown_labs
        );
    }

    if result.invalid_urls > 0 {
        println!(
            "  {} {} records had no usable document URL",
            style("!").yellow(),
            result.invalid_urls
        );
    }

    if result.unsupported > 0 {
        println!(
            "  {} {} documents in unsupported formats",
            style("!").yellow(),
            result.unsupported
        );
    }

    if result.errors > 0 {
        println!(
            "  {} {} records failed to fetch or parse",
            style("✗").red(),
            result.errors
        );
    }

    tracing::info!(
        "Enrichment complete: {} rows ({} extracted, {} failed)",
        result.processed,
        result.extracted,
        result.errors
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_zero_workers_still_processes_every_record() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.csv");
        std::fs::write(&input, "ID,LAB-ANALYSIS\n1,\n2,(x)\n").unwrap();
        let output = dir.path().join("out.csv");

        // Both records fail sanitation, so no request ever goes out.
        let settings = Settings::default();
        cmd_enrich(
            &settings,
            Some(input.as_path()),
            None,
            Some(output.as_path()),
            None,
            0,
            0,
        )
        .await
        .unwrap();

        let out = std::fs::read_to_string(&output).unwrap();
        assert_eq!(out.lines().count(), 3);
    }
}

//! Extract lab report fields from a single local document.

use std::path::Path;

use anyhow::Context;
use console::style;

use crate::extract::{extract_fields, extract_text};
use crate::models::REPORT_COLUMNS;
use crate::utils::{detect, FileKind};

/// Parse one local document and print the fields it yields.
pub async fn cmd_extract(file: &Path, json: bool) -> anyhow::Result<()> {
    let payload = tokio::fs::read(file)
        .await
        .with_context(|| format!("reading {}", file.display()))?;

    let kind = detect(&payload);
    if kind == FileKind::Unknown {
        anyhow::bail!("{} is neither PDF nor DOCX", file.display());
    }

    let text = extract_text(&payload, kind)?;
    let report = extract_fields(&text);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {} ({})",
        style("✓").green(),
        file.display(),
        kind.as_str()
    );
    for (label, value) in REPORT_COLUMNS.iter().zip(report.csv_cells()) {
        let shown = if value.is_empty() {
            "-".to_string()
        } else {
            value
        };
        println!("  {} {}", style(format!("{:<24}", label)).dim(), shown);
    }

    Ok(())
}

//! CLI commands implementation.
//!
//! This module contains the CLI parser and dispatches to command-specific modules.

mod enrich;
mod extract;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Settings;

#[derive(Parser)]
#[command(name = "coa")]
#[command(about = "Certificate-of-analysis acquisition and lab-result extraction")]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Enrich a product registry dataset with extracted lab report fields
    Enrich {
        /// Local dataset CSV (skips the remote fetch)
        #[arg(short, long, conflicts_with = "url")]
        input: Option<PathBuf>,
        /// Dataset URL to fetch when no input file is given
        #[arg(long, env = "COA_DATASET_URL")]
        url: Option<String>,
        /// Output CSV path
        #[arg(short, long, env = "COA_OUTPUT")]
        output: Option<PathBuf>,
        /// Dataset column holding the document reference
        #[arg(long)]
        column: Option<String>,
        /// Number of fetch workers (default: 10, minimum: 1)
        #[arg(short, long, default_value = "10")]
        workers: usize,
        /// Limit number of records to process (0 = unlimited)
        #[arg(short, long, default_value = "0")]
        limit: usize,
    },

    /// Extract lab report fields from a single local document
    Extract {
        /// PDF or DOCX file to read
        file: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Parse arguments and dispatch to the selected command.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::default();

    match cli.command {
        Commands::Enrich {
            input,
            url,
            output,
            column,
            workers,
            limit,
        } => {
            enrich::cmd_enrich(
                &settings,
                input.as_deref(),
                url.as_deref(),
                output.as_deref(),
                column.as_deref(),
                workers,
                limit,
            )
            .await
        }
        Commands::Extract { file, json } => extract::cmd_extract(&file, json).await,
    }
}

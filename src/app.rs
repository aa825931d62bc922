// Declare modules
pub mod batch;
pub mod cli;
pub mod config;
pub mod converter;
pub mod models;
pub mod output;
pub mod scanner;

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;
use std::io::Write;
use std::path::PathBuf;

use self::batch::BatchProcessor;
use self::cli::Cli;
use self::config::load_config;
use self::converter::DoclingCli;
use self::models::{BatchSummary, RuntimeConfig};
use self::output::OutputWriter;
use self::scanner::Scanner;

/// Initializes components and orchestrates data flow.
pub fn run() -> Result<BatchSummary> {
    // 1. Parse Args
    let args = Cli::parse();
    init_logging(args.verbose);

    // 2. Load Configuration
    let config = load_config(&args.config)?;

    // 3. Converter handle, configured explicitly
    let converter = DoclingCli::new(config.converter.clone());
    let format = args.output_format();

    // 4. Collect Inputs
    let files = collect_inputs(&args, &config)?;
    if files.is_empty() {
        return Ok(BatchSummary::default());
    }

    // 5. Convert & Save
    log::info!("Processing {} file(s)", files.len());
    let processor = BatchProcessor::new(&converter, OutputWriter::new(&config.output), format);
    Ok(processor.process_files(&files))
}

fn collect_inputs(args: &Cli, config: &RuntimeConfig) -> Result<Vec<PathBuf>> {
    if let Some(doc_file) = &args.doc_file {
        if !doc_file.exists() {
            anyhow::bail!("File not found: {}", doc_file.display());
        }
        return Ok(vec![doc_file.clone()]);
    }

    match &args.doc_dir {
        Some(doc_dir) => {
            if !doc_dir.exists() {
                anyhow::bail!("Directory not found: {}", doc_dir.display());
            }
            let files = Scanner::new(doc_dir.clone(), &config.supported_formats)?.scan();
            if files.is_empty() {
                log::warn!("No supported files found in: {}", doc_dir.display());
            }
            Ok(files)
        }
        None => Ok(Vec::new()),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - {} - {}",
                buf.timestamp_seconds(),
                record.level(),
                record.args()
            )
        })
        .try_init();
}

use crate::app::converter::Converter;
use crate::app::models::{BatchSummary, OutputFormat};
use crate::app::output::OutputWriter;
use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

pub struct BatchProcessor<'a, C: Converter> {
    converter: &'a C,
    writer: OutputWriter<'a>,
    format: OutputFormat,
}

impl<'a, C: Converter> BatchProcessor<'a, C> {
    pub fn new(converter: &'a C, writer: OutputWriter<'a>, format: OutputFormat) -> Self {
        Self {
            converter,
            writer,
            format,
        }
    }

    /// Converts every file in order; a failing file is logged and counted, never fatal.
    pub fn process_files(&self, files: &[PathBuf]) -> BatchSummary {
        let progress = progress_bar(files.len());
        let mut summary = BatchSummary::default();

        for file in files {
            progress.set_message(display_name(file));
            match self.process_single_file(file) {
                Ok(_) => summary.successful += 1,
                Err(err) => {
                    log::error!("Error processing {}: {:#}", file.display(), err);
                    summary.failed += 1;
                }
            }
            progress.inc(1);
        }
        progress.finish_and_clear();

        log::info!(
            "Processing complete. Successful: {}, Failed: {}",
            summary.successful,
            summary.failed
        );
        summary
    }

    fn process_single_file(&self, file: &Path) -> Result<PathBuf> {
        log::info!("Processing: {}", file.display());
        let content = self.converter.convert(file, self.format)?;
        self.writer.save(&content, file, self.format)
    }
}

fn progress_bar(len: usize) -> ProgressBar {
    let pb = ProgressBar::new(len as u64);
    let style = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
    )
    .map(|s| s.progress_chars("█▓▒░  "))
    .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}

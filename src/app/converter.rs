use crate::app::models::{ConverterSettings, OutputFormat};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use tempfile::TempDir;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Failed to create temporary directory: {0}")]
    TempDir(#[source] io::Error),
    #[error("Failed to run converter `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("Converter exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },
    #[error("Converter produced no .{extension} output")]
    MissingOutput { extension: &'static str },
    #[error("Failed to read converter output {}: {}", .0.display(), .1)]
    ReadOutput(PathBuf, #[source] io::Error),
    #[error("Converted document is empty")]
    EmptyDocument,
    #[error("Converter returned invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Turns one document into text in the requested format.
pub trait Converter {
    fn convert(&self, input: &Path, format: OutputFormat) -> Result<String, ConvertError>;
}

/// Drives the docling command-line tool, one child process per document.
///
/// Every option (device, OCR) travels as an argument to the child; the current
/// process environment is left untouched.
pub struct DoclingCli {
    settings: ConverterSettings,
}

impl DoclingCli {
    pub fn new(settings: ConverterSettings) -> Self {
        Self { settings }
    }

    fn arguments(&self, input: &Path, format: OutputFormat, out_dir: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = self.settings.extra_args.iter().map(OsString::from).collect();
        args.push("--to".into());
        args.push(format.docling_target().into());
        args.push("--output".into());
        args.push(out_dir.into());
        args.push("--device".into());
        args.push(self.settings.device.as_str().into());
        match self.settings.ocr {
            Some(true) => args.push("--ocr".into()),
            Some(false) => args.push("--no-ocr".into()),
            None => {}
        }
        args.push(input.into());
        args
    }
}

impl Converter for DoclingCli {
    fn convert(&self, input: &Path, format: OutputFormat) -> Result<String, ConvertError> {
        let temp_dir = TempDir::new().map_err(ConvertError::TempDir)?;

        let mut command = Command::new(&self.settings.command);
        command.args(self.arguments(input, format, temp_dir.path()));
        log::debug!("Running {:?}", command);

        let output = command.output().map_err(|source| ConvertError::Spawn {
            command: self.settings.command.clone(),
            source,
        })?;

        if !output.status.success() {
            return Err(ConvertError::Failed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let produced = find_output(temp_dir.path(), input, format.extension())?;
        log::debug!("Reading converter output {}", produced.display());
        let content =
            fs::read_to_string(&produced).map_err(|e| ConvertError::ReadOutput(produced, e))?;

        if content.is_empty() {
            return Err(ConvertError::EmptyDocument);
        }

        match format {
            OutputFormat::Json => {
                let document: serde_json::Value = serde_json::from_str(&content)?;
                Ok(serde_json::to_string_pretty(&document)?)
            }
            OutputFormat::Markdown | OutputFormat::Text => Ok(content),
        }
    }
}

/// Prefers `<stem>.<ext>`, falling back to the first file with that extension.
fn find_output(dir: &Path, input: &Path, extension: &'static str) -> Result<PathBuf, ConvertError> {
    if let Some(stem) = input.file_stem() {
        let mut expected = OsString::from(stem);
        expected.push(".");
        expected.push(extension);
        let candidate = dir.join(expected);
        if candidate.is_file() {
            return Ok(candidate);
        }
    }

    let entries = fs::read_dir(dir).map_err(|e| ConvertError::ReadOutput(dir.to_path_buf(), e))?;
    let mut matches: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && path.extension().map_or(false, |e| e == extension))
        .collect();
    matches.sort();

    matches
        .into_iter()
        .next()
        .ok_or(ConvertError::MissingOutput { extension })
}

use clap::ValueEnum;
use serde::Deserialize;
use std::path::PathBuf;

/// Serialization requested from the converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Structured markdown with headings, lists and tables
    Markdown,
    /// Full document model as JSON
    Json,
    /// Plain text only
    Text,
}

impl OutputFormat {
    /// File extension of saved output.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            OutputFormat::Json => "json",
            OutputFormat::Text => "txt",
        }
    }

    /// Value passed to docling's `--to` option.
    pub fn docling_target(self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            OutputFormat::Json => "json",
            OutputFormat::Text => "text",
        }
    }
}

/// Device the converter runs its models on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    #[default]
    Cpu,
    Cuda,
    Mps,
    Auto,
}

impl Device {
    pub fn as_str(self) -> &'static str {
        match self {
            Device::Cpu => "cpu",
            Device::Cuda => "cuda",
            Device::Mps => "mps",
            Device::Auto => "auto",
        }
    }
}

/// Where and how converted output is written.
#[derive(Debug, Clone)]
pub struct OutputSettings {
    pub output_dir: PathBuf,
    pub overwrite_existing: bool,
}

/// Explicit options handed to the external converter.
#[derive(Debug, Clone)]
pub struct ConverterSettings {
    pub command: String,
    pub device: Device,
    pub ocr: Option<bool>,
    pub extra_args: Vec<String>,
}

/// Configuration after defaults have been applied.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub supported_formats: Vec<String>,
    pub output: OutputSettings,
    pub converter: ConverterSettings,
}

/// Tally of a batch run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub successful: usize,
    pub failed: usize,
}

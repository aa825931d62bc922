use crate::app::models::{ConverterSettings, Device, OutputSettings, RuntimeConfig};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct ConfigFile {
    supported_formats: Vec<String>,
    output_settings: OutputSection,
    converter_settings: ConverterSection,
}

#[derive(Deserialize, Debug)]
#[serde(default)]
struct OutputSection {
    output_dir: PathBuf,
    overwrite_existing: bool,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            overwrite_existing: false,
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(default)]
struct ConverterSection {
    command: String,
    device: Device,
    ocr: Option<bool>,
    extra_args: Vec<String>,
}

impl Default for ConverterSection {
    fn default() -> Self {
        Self {
            command: String::from("docling"),
            device: Device::Cpu,
            ocr: None,
            extra_args: Vec::new(),
        }
    }
}

impl From<ConfigFile> for RuntimeConfig {
    fn from(file: ConfigFile) -> Self {
        RuntimeConfig {
            supported_formats: file.supported_formats,
            output: OutputSettings {
                output_dir: file.output_settings.output_dir,
                overwrite_existing: file.output_settings.overwrite_existing,
            },
            converter: ConverterSettings {
                command: file.converter_settings.command,
                device: file.converter_settings.device,
                ocr: file.converter_settings.ocr,
                extra_args: file.converter_settings.extra_args,
            },
        }
    }
}

/// Reads the JSON configuration at `path`, filling in defaults for absent keys.
pub fn load_config(path: &Path) -> Result<RuntimeConfig> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            anyhow::bail!("Configuration file not found: {}", path.display())
        }
        Err(e) => {
            return Err(e).context(format!(
                "Failed to read configuration file {}",
                path.display()
            ))
        }
    };

    parse_config(&content)
}

fn parse_config(content: &str) -> Result<RuntimeConfig> {
    let parsed: ConfigFile =
        serde_json::from_str(content).context("Invalid JSON in configuration file")?;
    log::debug!("Loaded configuration: {:?}", parsed);
    Ok(parsed.into())
}

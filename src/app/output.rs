use crate::app::models::{OutputFormat, OutputSettings};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub struct OutputWriter<'a> {
    settings: &'a OutputSettings,
}

impl<'a> OutputWriter<'a> {
    pub fn new(settings: &'a OutputSettings) -> Self {
        Self { settings }
    }

    /// Writes `content` next to its siblings in the output directory and returns the path used.
    pub fn save(&self, content: &str, input_path: &Path, format: OutputFormat) -> Result<PathBuf> {
        let output_dir = &self.settings.output_dir;
        fs::create_dir_all(output_dir).context(format!(
            "Failed to create output directory {}",
            output_dir.display()
        ))?;

        let stem = input_path
            .file_stem()
            .context(format!("Invalid input filename: {}", input_path.display()))?
            .to_string_lossy();
        let output_file = self.target_path(&stem, format.extension());

        fs::write(&output_file, content)
            .context(format!("Failed to write output {}", output_file.display()))?;
        log::info!("Output saved to: {}", output_file.display());

        Ok(output_file)
    }

    /// `<stem>.<ext>`, or the first free `<stem>_N.<ext>` when overwriting is disabled.
    fn target_path(&self, stem: &str, extension: &str) -> PathBuf {
        let dir = &self.settings.output_dir;
        let mut candidate = dir.join(format!("{}.{}", stem, extension));
        if self.settings.overwrite_existing {
            return candidate;
        }

        let mut counter = 1;
        while candidate.exists() {
            candidate = dir.join(format!("{}_{}.{}", stem, counter, extension));
            counter += 1;
        }
        candidate
    }
}

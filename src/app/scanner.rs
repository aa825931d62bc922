use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::{DirEntry, WalkBuilder};
use pathdiff::diff_paths;
use std::path::PathBuf;

/// Finds documents with a supported extension below a directory.
pub struct Scanner {
    root: PathBuf,
    extension_set: GlobSet,
}

impl Scanner {
    pub fn new(root: PathBuf, supported_formats: &[String]) -> Result<Self> {
        Ok(Self {
            root,
            extension_set: build_extension_set(supported_formats)?,
        })
    }

    /// Walks the whole tree and returns matching files in sorted order.
    pub fn scan(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();

        // Plain recursive walk: hidden files and .gitignore rules get no special treatment.
        let walker = WalkBuilder::new(&self.root).standard_filters(false).build();

        for result in walker {
            match result {
                Ok(entry) => {
                    if self.is_supported(&entry) {
                        files.push(entry.path().to_path_buf());
                    }
                }
                Err(err) => log::warn!("Error walking entry: {}", err),
            }
        }

        files.sort();
        files.dedup();
        log::debug!("Found {} supported file(s) in {}", files.len(), self.root.display());
        files
    }

    fn is_supported(&self, entry: &DirEntry) -> bool {
        let path = entry.path();
        let is_file = match entry.file_type() {
            // Symlinks are resolved so linked documents still count.
            Some(t) if t.is_symlink() => path.is_file(),
            Some(t) => t.is_file(),
            None => false,
        };
        if !is_file || path == self.root {
            return false;
        }
        match diff_paths(path, &self.root) {
            Some(relative) => self.extension_set.is_match(relative),
            None => false,
        }
    }
}

/// One `**/*<ext>` pattern per configured extension.
fn build_extension_set(extensions: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for ext in extensions {
        let pattern = format!("**/*{}", globset::escape(ext));
        builder.add(Glob::new(&pattern).context(format!("Invalid extension: {}", ext))?);
    }
    Ok(builder.build()?)
}

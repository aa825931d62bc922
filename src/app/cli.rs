use crate::app::models::OutputFormat;
use clap::{ArgGroup, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Batch-convert documents to markdown, JSON or text with docling",
    after_help = "Examples:\n  \
        docbatch --config config.json --doc-file media/sample.pdf\n  \
        docbatch --config config.json --doc-file media/sample.pdf --format-to-markdown\n  \
        docbatch --config config.json --doc-dir media\n  \
        docbatch --config config.json --doc-file media/sample.docx --output-format json",
    group(
        ArgGroup::new("input")
            .required(true)
            .args(["doc_file", "doc_dir"]),
    )
)]
pub struct Cli {
    /// Path to the JSON configuration file
    #[arg(long)]
    pub config: PathBuf,

    /// Single document to convert
    #[arg(long)]
    pub doc_file: Option<PathBuf>,

    /// Directory searched recursively for supported documents
    #[arg(long)]
    pub doc_dir: Option<PathBuf>,

    /// Write markdown output (overrides --output-format)
    #[arg(long)]
    pub format_to_markdown: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
    pub output_format: OutputFormat,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Cli {
    pub fn output_format(&self) -> OutputFormat {
        if self.format_to_markdown {
            OutputFormat::Markdown
        } else {
            self.output_format
        }
    }
}

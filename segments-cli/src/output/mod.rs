//! Output formatting module

use anyhow::{Context, Result};
use segments_core::Word;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// One tokenized input line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenizedLine {
    /// The input line
    pub input: String,
    /// Rendered output with separators
    pub output: String,
    /// Structured words
    pub words: Vec<Word>,
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format and output a single tokenized line
    fn format_line(&mut self, line: &TokenizedLine) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

/// Buffered writer for `path`, or stdout
pub fn open_writer(path: Option<&Path>) -> Result<Box<dyn Write + Send + Sync>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout())),
    }
}

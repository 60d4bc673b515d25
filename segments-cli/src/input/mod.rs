//! Input handling module

pub mod file_reader;
pub mod glob_resolver;
pub mod profile_reader;

pub use file_reader::FileReader;
pub use glob_resolver::resolve_patterns;
pub use profile_reader::{ProfileReader, ProfileTable};

use anyhow::Result;
use std::path::PathBuf;

use crate::progress::ProgressReporter;

/// Where the text to process comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Text given on the command line
    Arguments(Vec<String>),
    /// Files resolved from paths or glob patterns
    Files(Vec<PathBuf>),
    /// Standard input
    Stdin,
}

impl InputSource {
    /// Positional text wins over `--input` patterns; with neither, stdin is read
    pub fn from_args(text: &[String], patterns: &[String]) -> Result<Self> {
        if !text.is_empty() {
            if !patterns.is_empty() {
                log::warn!("Ignoring --input because text was given on the command line");
            }
            return Ok(InputSource::Arguments(text.to_vec()));
        }
        if !patterns.is_empty() {
            return Ok(InputSource::Files(resolve_patterns(patterns)?));
        }
        Ok(InputSource::Stdin)
    }

    /// Read every input as one document each
    pub fn read(&self, quiet: bool) -> Result<Vec<String>> {
        match self {
            InputSource::Arguments(text) => Ok(text.clone()),
            InputSource::Stdin => Ok(vec![FileReader::read_stdin()?]),
            InputSource::Files(files) => {
                let mut progress = ProgressReporter::new(quiet);
                progress.init_files(files.len() as u64);

                let mut documents = Vec::with_capacity(files.len());
                for path in files {
                    log::debug!("Reading {}", path.display());
                    documents.push(FileReader::read_text(path)?);
                    progress.file_completed(&path.display().to_string());
                }

                progress.finish();
                Ok(documents)
            }
        }
    }
}

/// Non-blank lines of all documents, in order
pub fn lines(documents: &[String]) -> Vec<&str> {
    documents
        .iter()
        .flat_map(|document| document.lines())
        .filter(|line| !line.trim().is_empty())
        .collect()
}

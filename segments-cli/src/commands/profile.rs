//! Profile command implementation

use anyhow::{Context, Result};
use clap::Args;
use segments_core::{ProfileReporter, ReportUnit, DEFAULT_MAPPING_COLUMN};
use std::io::Write;
use std::path::PathBuf;

use crate::config::{CliConfig, Normalization};
use crate::input::InputSource;
use crate::output::open_writer;

/// Arguments for the profile command
#[derive(Debug, Args)]
pub struct ProfileArgs {
    /// Text to build the profile from (default: read --input files or stdin)
    #[arg(value_name = "TEXT")]
    pub text: Vec<String>,

    /// Input files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN")]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Name of the identity mapping column
    #[arg(short, long, value_name = "COLUMN")]
    pub mapping: Option<String>,

    /// What counts as one grapheme
    #[arg(short, long, value_enum, default_value = "character")]
    pub unit: Unit,

    /// Unicode normalization applied to the text before counting
    #[arg(long, value_enum)]
    pub normalize: Option<Normalization>,
}

/// Counting unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Unit {
    /// Unicode scalar values
    Character,
    /// Extended grapheme clusters
    Grapheme,
}

impl From<Unit> for ReportUnit {
    fn from(unit: Unit) -> Self {
        match unit {
            Unit::Character => ReportUnit::Character,
            Unit::Grapheme => ReportUnit::Grapheme,
        }
    }
}

impl ProfileArgs {
    /// Execute the profile command
    pub fn execute(&self, config: &CliConfig, quiet: bool) -> Result<()> {
        log::debug!("Arguments: {:?}", self);

        let normalization = self
            .normalize
            .or(config.tokenize.normalize)
            .unwrap_or_default();
        let mapping = self
            .mapping
            .as_deref()
            .or(config.profile.mapping_column.as_deref())
            .unwrap_or(DEFAULT_MAPPING_COLUMN);

        let text = normalization.apply(
            &InputSource::from_args(&self.text, &self.input)?
                .read(quiet)?
                .join("\n"),
        );

        let report = ProfileReporter::with_unit(self.unit.into()).report(&text);
        log::info!("Found {} distinct graphemes", report.len());

        let tsv = report
            .to_tsv(mapping)
            .with_context(|| format!("Cannot use '{mapping}' as the mapping column"))?;
        let mut writer = open_writer(self.output.as_deref())?;
        writeln!(writer, "{tsv}")?;
        writer.flush()?;
        Ok(())
    }
}

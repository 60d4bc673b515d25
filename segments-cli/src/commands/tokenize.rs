//! Tokenize command implementation

use anyhow::{Context, Result};
use clap::Args;
use rayon::prelude::*;
use segments_core::config::defaults;
use segments_core::{Profile, Tokenizer, TokenizerConfig};
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{CliConfig, Mode, Normalization, Unmatched};
use crate::input::{self, InputSource, ProfileReader};
use crate::output::{open_writer, JsonFormatter, OutputFormatter, TextFormatter, TokenizedLine};

/// Arguments for the tokenize command
#[derive(Debug, Args)]
pub struct TokenizeArgs {
    /// Text to tokenize (default: read --input files or stdin)
    #[arg(value_name = "TEXT")]
    pub text: Vec<String>,

    /// Input files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN")]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Orthography profile (tab-separated)
    #[arg(short, long, value_name = "FILE")]
    pub profile: Option<PathBuf>,

    /// Rules file (default: <profile stem>.rules next to the profile)
    #[arg(short, long, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Profile column to map graphemes to
    #[arg(short, long, value_name = "COLUMN")]
    pub mapping: Option<String>,

    /// Unit of segmentation (default: grapheme without a profile, else character)
    #[arg(long, value_enum)]
    pub mode: Option<Mode>,

    /// Separator between graphemes
    #[arg(long, value_name = "SEP", allow_hyphen_values = true)]
    pub grapheme_separator: Option<String>,

    /// Separator between words
    #[arg(long, value_name = "SEP", allow_hyphen_values = true)]
    pub word_separator: Option<String>,

    /// Handling of input the profile does not cover
    #[arg(long, value_enum)]
    pub unmatched: Option<Unmatched>,

    /// Output for unmatched input with --unmatched replace
    #[arg(long, value_name = "MARKER", allow_hyphen_values = true)]
    pub marker: Option<String>,

    /// Unicode normalization applied to input and profile
    #[arg(long, value_enum)]
    pub normalize: Option<Normalization>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Tokenize lines in parallel
    #[arg(long)]
    pub parallel: bool,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One tokenized line per input line
    Text,
    /// JSON array with words and segments
    Json,
}

impl TokenizeArgs {
    /// Execute the tokenize command
    pub fn execute(&self, config: &CliConfig, quiet: bool) -> Result<()> {
        log::debug!("Arguments: {:?}", self);

        let normalization = self
            .normalize
            .or(config.tokenize.normalize)
            .unwrap_or_default();
        let column = self
            .mapping
            .as_deref()
            .or(config.tokenize.column.as_deref());

        let tokenizer = Tokenizer::with_config(
            Arc::new(self.load_profile(config, normalization)?),
            self.tokenizer_config(config)?,
        );

        let documents: Vec<String> = InputSource::from_args(&self.text, &self.input)?
            .read(quiet)?
            .iter()
            .map(|document| normalization.apply(document))
            .collect();
        let lines = input::lines(&documents);
        log::info!("Tokenizing {} lines", lines.len());

        let tokenize_line = |(index, line): (usize, &&str)| -> Result<TokenizedLine> {
            let words = tokenizer
                .segment(line, column)
                .with_context(|| format!("Failed to tokenize line {}", index + 1))?;
            Ok(TokenizedLine {
                input: line.to_string(),
                output: tokenizer.render(&words),
                words,
            })
        };

        let results: Vec<TokenizedLine> = if self.parallel {
            lines.par_iter().enumerate().map(tokenize_line).collect::<Result<_>>()?
        } else {
            lines.iter().enumerate().map(tokenize_line).collect::<Result<_>>()?
        };

        let writer = open_writer(self.output.as_deref())?;
        let mut formatter: Box<dyn OutputFormatter> = match self.format {
            OutputFormat::Text => Box::new(TextFormatter::new(writer)),
            OutputFormat::Json => Box::new(JsonFormatter::new(writer)),
        };
        for line in &results {
            formatter.format_line(line)?;
        }
        formatter.finish()
    }

    /// Flags override the config file, which overrides the defaults
    fn tokenizer_config(&self, config: &CliConfig) -> Result<TokenizerConfig> {
        let file = &config.tokenize;
        let mode = self.mode.or(file.mode).unwrap_or_else(|| self.default_mode());
        let unmatched = self.unmatched.or(file.unmatched).unwrap_or_default();
        let marker = self.marker.as_deref().or(file.marker.as_deref());

        let tokenizer_config = TokenizerConfig::builder()
            .grapheme_separator(
                self.grapheme_separator
                    .as_deref()
                    .or(file.grapheme_separator.as_deref())
                    .unwrap_or(defaults::GRAPHEME_SEPARATOR),
            )
            .word_separator(
                self.word_separator
                    .as_deref()
                    .or(file.word_separator.as_deref())
                    .unwrap_or(defaults::WORD_SEPARATOR),
            )
            .mode(mode.into())
            .unmatched(unmatched.policy(marker))
            .build()?;

        Ok(tokenizer_config)
    }

    /// Grapheme clusters when no profile or rules are given
    fn default_mode(&self) -> Mode {
        if self.profile.is_none() && self.rules.is_none() {
            Mode::Grapheme
        } else {
            Mode::default()
        }
    }

    fn load_profile(&self, config: &CliConfig, normalization: Normalization) -> Result<Profile> {
        let null_sentinel = config
            .profile
            .null_sentinel
            .as_deref()
            .unwrap_or(defaults::NULL_SENTINEL);
        let reader = ProfileReader::new(null_sentinel, normalization);

        match (&self.profile, &self.rules) {
            (Some(profile), rules) => reader.load(profile, rules.as_deref()),
            (None, Some(rules)) => reader.load_rules_only(rules),
            (None, None) => Ok(Profile::empty()),
        }
    }
}

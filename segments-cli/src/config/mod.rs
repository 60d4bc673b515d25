//! Configuration module

use anyhow::{Context, Result};
use segments_core::{SegmentationMode, UnmatchedPolicy};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use unicode_normalization::UnicodeNormalization;

use crate::error::CliError;

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Tokenization defaults
    #[serde(default)]
    pub tokenize: TokenizeConfig,

    /// Profile handling defaults
    #[serde(default)]
    pub profile: ProfileConfig,
}

impl CliConfig {
    /// Load a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = toml::from_str(&content)
            .map_err(|e| CliError::ConfigError(format!("{}: {e}", path.display())))?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}

/// Tokenization-related configuration
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct TokenizeConfig {
    /// Separator between graphemes of a word
    pub grapheme_separator: Option<String>,

    /// Separator between words
    pub word_separator: Option<String>,

    /// Unit of fallback segmentation
    pub mode: Option<Mode>,

    /// Handling of input no grapheme matches
    pub unmatched: Option<Unmatched>,

    /// Output for unmatched input under `unmatched = "replace"`
    pub marker: Option<String>,

    /// Profile column to project through
    pub column: Option<String>,

    /// Normalization applied to input and profile
    pub normalize: Option<Normalization>,
}

/// Profile-related configuration
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ProfileConfig {
    /// Cell value marking a grapheme that emits nothing
    pub null_sentinel: Option<String>,

    /// Name of the identity column written by `segments profile`
    pub mapping_column: Option<String>,
}

/// Segmentation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// One Unicode scalar value per unit
    #[default]
    Character,
    /// Extended grapheme clusters
    Grapheme,
    /// Grapheme clusters merged with IPA modifiers, stress, tones and ties
    Phonetic,
}

impl From<Mode> for SegmentationMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Character => SegmentationMode::Character,
            Mode::Grapheme => SegmentationMode::Grapheme,
            Mode::Phonetic => SegmentationMode::Phonetic,
        }
    }
}

/// Handling of unmatched input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Unmatched {
    /// Emit the raw unit
    #[default]
    Keep,
    /// Emit the replacement marker
    Replace,
    /// Emit nothing
    Ignore,
    /// Fail
    Strict,
}

impl Unmatched {
    /// Engine policy, `marker` is used by `Replace` only
    pub fn policy(self, marker: Option<&str>) -> UnmatchedPolicy {
        match self {
            Unmatched::Keep => UnmatchedPolicy::Keep,
            Unmatched::Replace => match marker {
                Some(marker) => UnmatchedPolicy::Replace(marker.to_string()),
                None => UnmatchedPolicy::replace(),
            },
            Unmatched::Ignore => UnmatchedPolicy::Ignore,
            Unmatched::Strict => UnmatchedPolicy::Strict,
        }
    }
}

/// Unicode normalization form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Normalization {
    /// Leave text untouched
    #[default]
    None,
    /// Canonical composition
    Nfc,
    /// Canonical decomposition
    Nfd,
}

impl Normalization {
    /// Normalize `text`
    pub fn apply(self, text: &str) -> String {
        match self {
            Normalization::None => text.to_string(),
            Normalization::Nfc => text.nfc().collect(),
            Normalization::Nfd => text.nfd().collect(),
        }
    }
}

//! Tokenizer configuration

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Default configuration constants
pub mod defaults {
    /// Separator placed between graphemes of a word
    pub const GRAPHEME_SEPARATOR: &str = " ";

    /// Separator placed between words (the `#` word marker)
    pub const WORD_SEPARATOR: &str = " # ";

    /// Spelling of the "emit nothing" mapping value
    pub const NULL_SENTINEL: &str = "NULL";

    /// Marker emitted for unmatched input under [`UnmatchedPolicy::Replace`](super::UnmatchedPolicy::Replace)
    pub const REPLACEMENT_MARKER: &str = "\u{FFFD}";
}

/// How a word is partitioned into indivisible units before matching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentationMode {
    /// Every `char` is a unit
    #[default]
    Character,
    /// Extended grapheme clusters are units
    Grapheme,
    /// Grapheme clusters merged with IPA modifiers, stress marks, tone letters and tie bars
    Phonetic,
}

/// What to emit for input that no grapheme matches
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UnmatchedPolicy {
    /// Emit the raw unit as its own mapping
    #[default]
    Keep,
    /// Emit a fixed marker instead of the unit
    Replace(String),
    /// Emit nothing; the unit is still consumed
    Ignore,
    /// Fail the tokenize call
    Strict,
}

impl UnmatchedPolicy {
    /// Replacement policy using the default U+FFFD marker
    pub fn replace() -> Self {
        UnmatchedPolicy::Replace(defaults::REPLACEMENT_MARKER.to_string())
    }
}

/// Tokenizer configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizerConfig {
    pub(crate) grapheme_separator: String,
    pub(crate) word_separator: String,
    pub(crate) mode: SegmentationMode,
    pub(crate) unmatched: UnmatchedPolicy,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            grapheme_separator: defaults::GRAPHEME_SEPARATOR.to_string(),
            word_separator: defaults::WORD_SEPARATOR.to_string(),
            mode: SegmentationMode::default(),
            unmatched: UnmatchedPolicy::default(),
        }
    }
}

impl TokenizerConfig {
    /// Create a configuration builder
    pub fn builder() -> TokenizerConfigBuilder {
        TokenizerConfigBuilder::default()
    }

    /// Separator between graphemes of one word
    pub fn grapheme_separator(&self) -> &str {
        &self.grapheme_separator
    }

    /// Separator between words
    pub fn word_separator(&self) -> &str {
        &self.word_separator
    }

    /// Unit partitioning mode
    pub fn mode(&self) -> SegmentationMode {
        self.mode
    }

    /// Policy for unmatched input
    pub fn unmatched(&self) -> &UnmatchedPolicy {
        &self.unmatched
    }

    pub(crate) fn validate(&self) -> Result<(), Error> {
        if self.word_separator.is_empty() {
            return Err(Error::Config("word separator must not be empty".into()));
        }

        if let UnmatchedPolicy::Replace(marker) = &self.unmatched {
            if marker.is_empty() {
                return Err(Error::Config(
                    "replacement marker must not be empty (use the ignore policy instead)".into(),
                ));
            }
        }

        Ok(())
    }
}

/// Fluent builder for [`TokenizerConfig`]
#[derive(Debug, Default)]
pub struct TokenizerConfigBuilder {
    grapheme_separator: Option<String>,
    word_separator: Option<String>,
    mode: Option<SegmentationMode>,
    unmatched: Option<UnmatchedPolicy>,
}

impl TokenizerConfigBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the separator between graphemes
    pub fn grapheme_separator(mut self, separator: impl Into<String>) -> Self {
        self.grapheme_separator = Some(separator.into());
        self
    }

    /// Set the separator between words
    pub fn word_separator(mut self, separator: impl Into<String>) -> Self {
        self.word_separator = Some(separator.into());
        self
    }

    /// Set the unit partitioning mode
    pub fn mode(mut self, mode: SegmentationMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Set the unmatched input policy
    pub fn unmatched(mut self, policy: UnmatchedPolicy) -> Self {
        self.unmatched = Some(policy);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<TokenizerConfig, Error> {
        let mut config = TokenizerConfig::default();

        if let Some(separator) = self.grapheme_separator {
            config.grapheme_separator = separator;
        }
        if let Some(separator) = self.word_separator {
            config.word_separator = separator;
        }
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(policy) = self.unmatched {
            config.unmatched = policy;
        }

        config.validate()?;
        Ok(config)
    }
}

//! Profile-driven tokenization
//!
//! A tokenize call rewrites the whole input with the profile's rules, splits
//! the result on whitespace, segments each word independently with the
//! [`Matcher`], projects every token through the requested column and joins
//! the surviving outputs with the configured separators.

use std::sync::Arc;

use serde::Serialize;

use crate::config::{TokenizerConfig, UnmatchedPolicy};
use crate::error::{Error, TokenizeError};
use crate::matcher::{Matcher, Token};
use crate::profile::{ColumnSelection, Mapping, Profile};

/// One token of a word with its projected output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    /// Matched pattern, or the raw unit for unmatched input
    pub surface: String,
    /// Output in the requested column; `None` when nothing is emitted
    pub mapped: Option<String>,
    /// Byte offset of the token start in the rewritten text
    pub start: usize,
    /// Byte offset one past the token end in the rewritten text
    pub end: usize,
    /// Whether a profile grapheme matched
    pub matched: bool,
}

/// A whitespace-delimited word and its segments
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Word {
    /// Byte offset of the word start in the rewritten text
    pub start: usize,
    /// Byte offset one past the word end in the rewritten text
    pub end: usize,
    /// Segments in input order
    pub segments: Vec<Segment>,
}

impl Word {
    /// Emitted outputs, skipping dropped tokens
    pub fn outputs(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| s.mapped.as_deref())
    }

    /// Join the outputs with `separator`
    pub fn render(&self, separator: &str) -> String {
        self.outputs().collect::<Vec<_>>().join(separator)
    }
}

/// Tokenizer bound to a shared, read-only profile
#[derive(Debug, Clone)]
pub struct Tokenizer {
    profile: Arc<Profile>,
    config: TokenizerConfig,
}

impl Tokenizer {
    /// Create a tokenizer with default configuration
    pub fn new(profile: Arc<Profile>) -> Self {
        Self::with_config(profile, TokenizerConfig::default())
    }

    /// Create a tokenizer with custom configuration
    pub fn with_config(profile: Arc<Profile>, config: TokenizerConfig) -> Self {
        Self { profile, config }
    }

    /// Tokenizer without a profile: every unit falls back
    pub fn without_profile(config: TokenizerConfig) -> Self {
        Self::with_config(Arc::new(Profile::empty()), config)
    }

    /// The shared profile
    pub fn profile(&self) -> &Arc<Profile> {
        &self.profile
    }

    /// The configuration
    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    /// Tokenize `text` into a single separated string
    ///
    /// `column` selects the mapping column; `None` or `"Grapheme"` yields the
    /// matched patterns themselves.
    pub fn tokenize(&self, text: &str, column: Option<&str>) -> Result<String, TokenizeError> {
        let words = self.segment(text, column)?;
        Ok(self.render(&words))
    }

    /// Join segmented words with the configured separators
    pub fn render(&self, words: &[Word]) -> String {
        words
            .iter()
            .map(|word| word.render(&self.config.grapheme_separator))
            .collect::<Vec<_>>()
            .join(&self.config.word_separator)
    }

    /// Tokenize `text` into structured words and segments
    pub fn segment(&self, text: &str, column: Option<&str>) -> Result<Vec<Word>, TokenizeError> {
        let selection = self.profile.select_column(column)?;
        let rewritten = self.profile.rules().apply(text);
        let matcher = Matcher::new(self.profile.table(), self.config.mode);

        split_words(&rewritten)
            .into_iter()
            .map(|(offset, word)| {
                let segments = matcher
                    .tokens(word, offset)
                    .into_iter()
                    .map(|token| self.project(&token, selection))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok::<_, TokenizeError>(Word {
                    start: offset,
                    end: offset + word.len(),
                    segments,
                })
            })
            .collect()
    }

    /// Project one token through the selected column
    fn project(
        &self,
        token: &Token<'_, '_>,
        selection: ColumnSelection,
    ) -> Result<Segment, TokenizeError> {
        let mapped = match token.grapheme {
            Some(grapheme) => match selection {
                ColumnSelection::Pattern => Some(grapheme.pattern().to_string()),
                ColumnSelection::Mapping(index) => match grapheme.mapping(index) {
                    Some(Mapping::Value(value)) => Some(value.clone()),
                    Some(Mapping::Null) => None,
                    None => Some(token.surface.to_string()),
                },
            },
            None => self.fallback(token)?,
        };

        Ok(Segment {
            surface: token.surface.to_string(),
            mapped,
            start: token.start,
            end: token.end,
            matched: token.is_matched(),
        })
    }

    fn fallback(&self, token: &Token<'_, '_>) -> Result<Option<String>, TokenizeError> {
        log::debug!(
            "no grapheme matches {:?} at byte {}",
            token.surface,
            token.start
        );

        match &self.config.unmatched {
            UnmatchedPolicy::Keep => Ok(Some(token.surface.to_string())),
            UnmatchedPolicy::Replace(marker) => Ok(Some(marker.clone())),
            UnmatchedPolicy::Ignore => Ok(None),
            UnmatchedPolicy::Strict => Err(TokenizeError::UnmatchedInput {
                unit: token.surface.to_string(),
                position: token.start,
            }),
        }
    }
}

/// Tokenize with explicit separators and otherwise default configuration
pub fn tokenize(
    text: &str,
    profile: &Arc<Profile>,
    column: Option<&str>,
    word_separator: &str,
    grapheme_separator: &str,
) -> Result<String, Error> {
    let config = TokenizerConfig::builder()
        .word_separator(word_separator)
        .grapheme_separator(grapheme_separator)
        .build()?;
    Ok(Tokenizer::with_config(Arc::clone(profile), config).tokenize(text, column)?)
}

/// Whitespace-delimited words with their byte offsets
fn split_words(text: &str) -> Vec<(usize, &str)> {
    let mut words = Vec::new();
    let mut start = None;

    for (i, ch) in text.char_indices() {
        if ch.is_whitespace() {
            if let Some(s) = start.take() {
                words.push((s, &text[s..i]));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        words.push((s, &text[s..]));
    }

    words
}

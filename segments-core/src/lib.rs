//! Orthography-profile driven segmentation of text into graphemes
//!
//! An orthography profile declares the graphemes of a writing system
//! (single characters or multigraphs such as `ch` or `aa`), optional output
//! columns for each of them (an IPA transcription, say) and an ordered list
//! of regex rewrite rules. Tokenizing a text with a profile:
//!
//! 1. rewrites the whole text with the rules, in order, once each;
//! 2. splits the result into whitespace-delimited words;
//! 3. segments every word greedily, always taking the longest grapheme that
//!    matches and never backtracking;
//! 4. projects each token through the requested column and joins the outputs.
//!
//! Unicode normalization is the caller's job: profile and input must use the
//! same normalization form, otherwise segmentation is silently wrong.
//!
//! # Example
//!
//! ```rust
//! use segments_core::{Profile, ProfileRow, Tokenizer};
//! use std::sync::Arc;
//!
//! let profile = Profile::new(vec![
//!     ProfileRow::new("aa").with("mapping", "x"),
//!     ProfileRow::new("a").with("mapping", "a"),
//!     ProfileRow::new("ä").with("mapping", "ä"),
//!     ProfileRow::new("ü").with("mapping", "ü"),
//!     ProfileRow::new("ö").with("mapping", "ö"),
//! ])
//! .unwrap();
//!
//! let tokenizer = Tokenizer::new(Arc::new(profile));
//! assert_eq!(
//!     tokenizer.tokenize("aäaaöaaüaa", Some("mapping")).unwrap(),
//!     "a ä x ö x ü x"
//! );
//! assert_eq!(
//!     tokenizer.tokenize("aäaaöaaüaa", None).unwrap(),
//!     "a ä aa ö aa ü aa"
//! );
//! ```

pub mod cluster;
pub mod config;
pub mod error;
pub mod matcher;
pub mod profile;
pub mod reporter;
pub mod tokenizer;

pub use config::{SegmentationMode, TokenizerConfig, TokenizerConfigBuilder, UnmatchedPolicy};
pub use error::{Error, ProfileError, Result, TokenizeError};
pub use matcher::{Matcher, Token};
pub use profile::{
    Grapheme, GraphemeTable, Mapping, Profile, ProfileBuilder, ProfileRow, RuleRow, RuleSet,
    GRAPHEME_COLUMN,
};
pub use reporter::{
    GraphemeFrequency, ProfileReport, ProfileReporter, ReportUnit, DEFAULT_MAPPING_COLUMN,
    FREQUENCY_COLUMN,
};
pub use tokenizer::{tokenize, Segment, Tokenizer, Word};

//! Error types for profile construction and tokenization

use thiserror::Error;

/// Errors raised while building a [`Profile`](crate::Profile)
///
/// Row numbers are 1-based positions in the supplied row sequence.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// The same grapheme pattern was declared twice
    #[error("duplicate grapheme '{pattern}' in row {row} (first declared in row {first})")]
    DuplicatePattern {
        /// The repeated pattern
        pattern: String,
        /// Row of the repeated declaration
        row: usize,
        /// Row of the first declaration
        first: usize,
    },

    /// A row has an empty pattern
    #[error("empty grapheme pattern in row {row}")]
    EmptyPattern {
        /// Offending row
        row: usize,
    },

    /// A row maps a column that is not among the declared columns
    #[error("unknown mapping column '{column}' in row {row}")]
    UnknownColumn {
        /// The undeclared column name
        column: String,
        /// Offending row
        row: usize,
    },

    /// A bootstrap mapping column reuses a column name the report writes itself
    #[error("mapping column '{column}' clashes with a reserved column")]
    ReservedColumn {
        /// The requested mapping column
        column: String,
    },

    /// A rewrite rule pattern failed to compile
    #[error("invalid rule {index} '{pattern}': {source}")]
    InvalidRule {
        /// 1-based rule index
        index: usize,
        /// The rule's source pattern
        pattern: String,
        /// Underlying regex error
        #[source]
        source: regex::Error,
    },
}

/// Errors raised by a single tokenize call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizeError {
    /// The requested mapping column is not part of the active profile
    #[error("column '{column}' not found in profile (available: {})", available.join(", "))]
    UnknownColumn {
        /// Requested column
        column: String,
        /// Columns the profile knows about
        available: Vec<String>,
    },

    /// Input not covered by the profile under the strict policy
    #[error("no grapheme matches '{unit}' at byte {position}")]
    UnmatchedInput {
        /// The unit that could not be matched
        unit: String,
        /// Byte offset in the rewritten text
        position: usize,
    },
}

/// Top-level error type
#[derive(Debug, Error)]
pub enum Error {
    /// Profile construction failed
    #[error("profile error: {0}")]
    Profile(#[from] ProfileError),

    /// Tokenization failed
    #[error("tokenize error: {0}")]
    Tokenize(#[from] TokenizeError),

    /// Invalid configuration
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, Error>;

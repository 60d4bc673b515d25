//! Bootstrap profiles from raw text
//!
//! Counts the distinct units of a text and emits identity rows, the starting
//! point a profile author then edits by hand.

use std::collections::HashMap;
use std::fmt;

use unicode_segmentation::UnicodeSegmentation;

use crate::error::ProfileError;
use crate::profile::{ProfileRow, GRAPHEME_COLUMN};

/// Default name of the identity mapping column
pub const DEFAULT_MAPPING_COLUMN: &str = "mapping";

/// Name of the frequency column
pub const FREQUENCY_COLUMN: &str = "frequency";

/// What the reporter counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportUnit {
    /// Unicode scalar values
    #[default]
    Character,
    /// Extended grapheme clusters
    Grapheme,
}

/// A distinct unit and how often it occurs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphemeFrequency {
    /// The unit
    pub grapheme: String,
    /// Number of occurrences
    pub frequency: usize,
}

/// Frequency rows, most frequent first, ties in first-occurrence order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileReport {
    rows: Vec<GraphemeFrequency>,
}

impl ProfileReport {
    /// The rows
    pub fn rows(&self) -> &[GraphemeFrequency] {
        &self.rows
    }

    /// Number of distinct units
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no unit was counted
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Identity profile rows with `frequency` and `mapping_column` values
    ///
    /// Fails when `mapping_column` is `frequency` or `Grapheme`.
    pub fn to_rows(&self, mapping_column: &str) -> Result<Vec<ProfileRow>, ProfileError> {
        check_mapping_column(mapping_column)?;
        Ok(self
            .rows
            .iter()
            .map(|row| {
                ProfileRow::new(row.grapheme.as_str())
                    .with(FREQUENCY_COLUMN, row.frequency.to_string())
                    .with(mapping_column, row.grapheme.as_str())
            })
            .collect())
    }

    /// Tab-separated rendering with a header line
    pub fn to_tsv(&self, mapping_column: &str) -> Result<String, ProfileError> {
        check_mapping_column(mapping_column)?;
        Ok(self.render_tsv(mapping_column))
    }

    fn render_tsv(&self, mapping_column: &str) -> String {
        let mut out = format!("{GRAPHEME_COLUMN}\t{FREQUENCY_COLUMN}\t{mapping_column}");
        for row in &self.rows {
            out.push('\n');
            out.push_str(&format!(
                "{}\t{}\t{}",
                row.grapheme, row.frequency, row.grapheme
            ));
        }
        out
    }
}

impl fmt::Display for ProfileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_tsv(DEFAULT_MAPPING_COLUMN))
    }
}

fn check_mapping_column(column: &str) -> Result<(), ProfileError> {
    if column == FREQUENCY_COLUMN || column == GRAPHEME_COLUMN {
        return Err(ProfileError::ReservedColumn {
            column: column.to_string(),
        });
    }
    Ok(())
}

/// Counts units of raw text
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileReporter {
    unit: ReportUnit,
}

impl ProfileReporter {
    /// Reporter counting characters
    pub fn new() -> Self {
        Self::default()
    }

    /// Reporter counting the given unit
    pub fn with_unit(unit: ReportUnit) -> Self {
        Self { unit }
    }

    /// Count the distinct non-whitespace units of `text`
    pub fn report(&self, text: &str) -> ProfileReport {
        match self.unit {
            ReportUnit::Character => count(text.char_indices().map(|(i, ch)| {
                &text[i..i + ch.len_utf8()]
            })),
            ReportUnit::Grapheme => count(text.graphemes(true)),
        }
    }
}

fn count<'t>(units: impl Iterator<Item = &'t str>) -> ProfileReport {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut rows: Vec<GraphemeFrequency> = Vec::new();

    for unit in units.filter(|u| !u.chars().all(char::is_whitespace)) {
        match index.get(unit) {
            Some(&slot) => rows[slot].frequency += 1,
            None => {
                index.insert(unit, rows.len());
                rows.push(GraphemeFrequency {
                    grapheme: unit.to_string(),
                    frequency: 1,
                });
            }
        }
    }

    // Stable: equal frequencies keep first-occurrence order
    rows.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    ProfileReport { rows }
}

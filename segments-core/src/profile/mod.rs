//! Orthography profiles
//!
//! A [`Profile`] combines an ordered [`RuleSet`] with a [`GraphemeTable`] and
//! the list of mapping columns its graphemes may be projected through. It is
//! built once from externally supplied rows and never mutated afterwards, so a
//! single instance can be shared between any number of tokenizers and threads.

mod row;
mod rules;
mod table;

pub use row::{Mapping, ProfileRow, RuleRow};
pub use rules::RuleSet;
pub use table::{Grapheme, GraphemeTable};

use std::collections::HashMap;

use crate::config::defaults;
use crate::error::{ProfileError, TokenizeError};
use crate::reporter::ProfileReporter;

/// Name of the column holding the surface pattern
pub const GRAPHEME_COLUMN: &str = "Grapheme";

/// Column a tokenize call projects tokens through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ColumnSelection {
    /// The matched pattern itself
    Pattern,
    /// A mapping column by index
    Mapping(usize),
}

/// Immutable orthography profile
#[derive(Debug, Clone, Default)]
pub struct Profile {
    table: GraphemeTable,
    rules: RuleSet,
    columns: Vec<String>,
}

impl Profile {
    /// Create a profile builder
    pub fn builder() -> ProfileBuilder {
        ProfileBuilder::default()
    }

    /// Build a profile from grapheme rows with default settings and no rules
    pub fn new(rows: impl IntoIterator<Item = ProfileRow>) -> Result<Self, ProfileError> {
        Self::builder().rows(rows).build()
    }

    /// A profile with no graphemes and no rules; every unit falls back
    pub fn empty() -> Self {
        Self::default()
    }

    /// Bootstrap an identity profile from the characters found in `text`
    ///
    /// Columns are `frequency` and `mapping_column`, rows ordered by descending
    /// frequency. `mapping_column` may not be `frequency` or `Grapheme`.
    pub fn from_text(text: &str, mapping_column: &str) -> Result<Self, ProfileError> {
        let report = ProfileReporter::new().report(text);
        Self::new(report.to_rows(mapping_column)?)
    }

    /// The grapheme table
    pub fn table(&self) -> &GraphemeTable {
        &self.table
    }

    /// The rewrite rules
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Mapping column names in first-declared order
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Graphemes in declaration order
    pub fn graphemes(&self) -> &[Grapheme] {
        self.table.graphemes()
    }

    /// Look up a grapheme by its exact pattern
    pub fn get(&self, pattern: &str) -> Option<&Grapheme> {
        self.table.get(pattern)
    }

    /// Mapping of `pattern` in `column`, if both exist and the row set it
    pub fn mapping(&self, pattern: &str, column: &str) -> Option<&Mapping> {
        let index = self.columns.iter().position(|c| c == column)?;
        self.get(pattern)?.mapping(index)
    }

    /// Resolve a requested column once per tokenize call
    pub(crate) fn select_column(
        &self,
        column: Option<&str>,
    ) -> Result<ColumnSelection, TokenizeError> {
        match column {
            None => Ok(ColumnSelection::Pattern),
            Some(name) if name == GRAPHEME_COLUMN => Ok(ColumnSelection::Pattern),
            Some(name) => self
                .columns
                .iter()
                .position(|c| c == name)
                .map(ColumnSelection::Mapping)
                .ok_or_else(|| TokenizeError::UnknownColumn {
                    column: name.to_string(),
                    available: std::iter::once(GRAPHEME_COLUMN.to_string())
                        .chain(self.columns.iter().cloned())
                        .collect(),
                }),
        }
    }
}

/// Builder validating rows, columns and rules into a [`Profile`]
#[derive(Debug, Clone)]
pub struct ProfileBuilder {
    rows: Vec<ProfileRow>,
    rules: Vec<RuleRow>,
    columns: Option<Vec<String>>,
    null_sentinel: String,
}

impl Default for ProfileBuilder {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            rules: Vec::new(),
            columns: None,
            null_sentinel: defaults::NULL_SENTINEL.to_string(),
        }
    }
}

impl ProfileBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Append grapheme rows
    pub fn rows(mut self, rows: impl IntoIterator<Item = ProfileRow>) -> Self {
        self.rows.extend(rows);
        self
    }

    /// Append one grapheme row
    pub fn row(mut self, row: ProfileRow) -> Self {
        self.rows.push(row);
        self
    }

    /// Append rewrite rules
    pub fn rules(mut self, rules: impl IntoIterator<Item = RuleRow>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Append one rewrite rule
    pub fn rule(mut self, rule: RuleRow) -> Self {
        self.rules.push(rule);
        self
    }

    /// Declare the mapping columns; rows may then only use these
    ///
    /// Without a declaration the columns are collected from the rows.
    pub fn columns<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Set the spelling of the "emit nothing" value
    pub fn null_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.null_sentinel = sentinel.into();
        self
    }

    /// Validate and build the profile
    pub fn build(self) -> Result<Profile, ProfileError> {
        let rules = RuleSet::compile(self.rules)?;

        let declared = self.columns.is_some();
        let mut columns: Vec<String> = self
            .columns
            .unwrap_or_default()
            .into_iter()
            .filter(|c| c != GRAPHEME_COLUMN)
            .collect();
        let mut index: HashMap<String, usize> = columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), i))
            .collect();

        let mut resolved = Vec::with_capacity(self.rows.len());
        for (i, row) in self.rows.into_iter().enumerate() {
            let row_number = i + 1;
            let mut mappings: Vec<Option<Mapping>> = vec![None; columns.len()];

            for (column, raw) in row.values {
                let slot = match index.get(&column) {
                    Some(&slot) => slot,
                    None if declared || column == GRAPHEME_COLUMN => {
                        return Err(ProfileError::UnknownColumn {
                            column,
                            row: row_number,
                        });
                    }
                    None => {
                        let slot = columns.len();
                        index.insert(column.clone(), slot);
                        columns.push(column);
                        slot
                    }
                };

                if mappings.len() <= slot {
                    mappings.resize(slot + 1, None);
                }
                mappings[slot] = Some(Mapping::parse(&raw, &self.null_sentinel));
            }

            resolved.push(Grapheme::new(row.pattern, row_number, mappings));
        }

        let table = GraphemeTable::build(resolved)?;

        log::debug!(
            "built profile: {} graphemes (longest {} chars), columns [{}], {} rules",
            table.len(),
            table.max_pattern_chars(),
            columns.join(", "),
            rules.len()
        );

        Ok(Profile {
            table,
            rules,
            columns,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ipa_rows() -> Vec<ProfileRow> {
        vec![
            ProfileRow::new("aa").with("IPA", "aː").with("XSAMPA", "a:"),
            ProfileRow::new("ch").with("IPA", "tʃ").with("XSAMPA", "tS"),
            ProfileRow::new("-").with("IPA", "NULL").with("XSAMPA", "NULL"),
        ]
    }

    #[test]
    fn test_columns_collected_in_first_seen_order() {
        let profile = Profile::new(vec![
            ProfileRow::new("a").with("mapping", "a"),
            ProfileRow::new("b").with("IPA", "b").with("mapping", "B"),
        ])
        .unwrap();
        assert_eq!(profile.columns(), &["mapping".to_string(), "IPA".to_string()]);
        assert_eq!(
            profile.mapping("b", "mapping"),
            Some(&Mapping::Value("B".to_string()))
        );
        // "a" never set IPA
        assert_eq!(profile.mapping("a", "IPA"), None);
    }

    #[test]
    fn test_null_cells_become_null_mappings() {
        let profile = Profile::new(ipa_rows()).unwrap();
        assert_eq!(profile.mapping("-", "XSAMPA"), Some(&Mapping::Null));
        assert_eq!(
            profile.mapping("aa", "XSAMPA"),
            Some(&Mapping::Value("a:".to_string()))
        );
    }

    #[test]
    fn test_custom_null_sentinel() {
        let profile = Profile::builder()
            .null_sentinel("<none>")
            .row(ProfileRow::new("x").with("IPA", "<NONE>"))
            .row(ProfileRow::new("y").with("IPA", "NULL"))
            .build()
            .unwrap();
        assert_eq!(profile.mapping("x", "IPA"), Some(&Mapping::Null));
        assert_eq!(
            profile.mapping("y", "IPA"),
            Some(&Mapping::Value("NULL".to_string()))
        );
    }

    #[test]
    fn test_declared_columns_reject_unknown() {
        let result = Profile::builder()
            .columns(["IPA"])
            .rows(ipa_rows())
            .build();
        match result {
            Err(ProfileError::UnknownColumn { column, row }) => {
                assert_eq!(column, "XSAMPA");
                assert_eq!(row, 1);
            }
            other => panic!("Expected UnknownColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_declared_columns_keep_unused_columns() {
        let profile = Profile::builder()
            .columns(["Grapheme", "IPA", "XSAMPA", "notes"])
            .rows(ipa_rows())
            .build()
            .unwrap();
        assert_eq!(profile.columns(), &["IPA", "XSAMPA", "notes"]);
        assert_eq!(profile.mapping("aa", "notes"), None);
    }

    #[test]
    fn test_grapheme_column_is_reserved() {
        let result = Profile::new(vec![ProfileRow::new("a").with("Grapheme", "b")]);
        assert!(matches!(
            result,
            Err(ProfileError::UnknownColumn { row: 1, .. })
        ));
    }

    #[test]
    fn test_duplicate_rows_fail_fast() {
        let result = Profile::new(vec![ProfileRow::new("a"), ProfileRow::new("a")]);
        assert!(matches!(
            result,
            Err(ProfileError::DuplicatePattern { row: 2, first: 1, .. })
        ));
    }

    #[test]
    fn test_invalid_rule_fails_build() {
        let result = Profile::builder()
            .rows(ipa_rows())
            .rule(RuleRow::new("[", ""))
            .build();
        assert!(matches!(result, Err(ProfileError::InvalidRule { index: 1, .. })));
    }

    #[test]
    fn test_select_column() {
        let profile = Profile::new(ipa_rows()).unwrap();
        assert_eq!(profile.select_column(None), Ok(ColumnSelection::Pattern));
        assert_eq!(
            profile.select_column(Some("Grapheme")),
            Ok(ColumnSelection::Pattern)
        );
        assert_eq!(
            profile.select_column(Some("XSAMPA")),
            Ok(ColumnSelection::Mapping(1))
        );

        match profile.select_column(Some("xx")) {
            Err(TokenizeError::UnknownColumn { column, available }) => {
                assert_eq!(column, "xx");
                assert_eq!(available, vec!["Grapheme", "IPA", "XSAMPA"]);
            }
            other => panic!("Expected UnknownColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_from_text_builds_identity_profile() {
        let profile = Profile::from_text("abcdabcab", "mapping").unwrap();
        assert_eq!(profile.columns(), &["frequency", "mapping"]);
        assert_eq!(
            profile.mapping("a", "frequency"),
            Some(&Mapping::Value("3".to_string()))
        );
        assert_eq!(
            profile.mapping("d", "mapping"),
            Some(&Mapping::Value("d".to_string()))
        );
        assert_eq!(profile.graphemes()[0].pattern(), "a");
    }

    #[test]
    fn test_from_text_rejects_frequency_as_mapping_column() {
        let result = Profile::from_text("aab", "frequency");
        match result {
            Err(ProfileError::ReservedColumn { column }) => assert_eq!(column, "frequency"),
            other => panic!("Expected ReservedColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_profile() {
        let profile = Profile::empty();
        assert!(profile.table().is_empty());
        assert!(profile.rules().is_empty());
        assert!(profile.columns().is_empty());
    }

    #[test]
    fn test_profile_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Profile>();
    }
}

//! Reading orthography profiles and rules files
//!
//! A profile file is tab-separated with a header row that must contain a
//! `Grapheme` column. Blank lines are skipped; every other line is a row, so
//! `#` is an ordinary grapheme. An empty cell leaves the column without a
//! value for that grapheme.
//!
//! A rules file holds one `pattern,replacement` pair per line; lines starting
//! with `#` are comments. Fields are taken verbatim. A field wrapped in double
//! quotes may contain commas, with `""` standing for a literal quote. Unquoted
//! lines split on the last comma so patterns may contain commas themselves.

use anyhow::{Context, Result};
use segments_core::config::defaults;
use segments_core::{Profile, ProfileRow, RuleRow, GRAPHEME_COLUMN};
use std::path::{Path, PathBuf};

use super::FileReader;
use crate::config::Normalization;
use crate::error::CliError;

/// Extension of a rules file found next to its profile
pub const RULES_EXTENSION: &str = "rules";

/// Loads profile and rules files into a [`Profile`]
#[derive(Debug, Clone)]
pub struct ProfileReader {
    null_sentinel: String,
    normalization: Normalization,
}

impl Default for ProfileReader {
    fn default() -> Self {
        Self {
            null_sentinel: defaults::NULL_SENTINEL.to_string(),
            normalization: Normalization::None,
        }
    }
}

/// Parsed contents of a profile file
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileTable {
    /// Header names except `Grapheme`, in file order
    pub columns: Vec<String>,
    /// Grapheme rows
    pub rows: Vec<ProfileRow>,
}

impl ProfileReader {
    /// Create a reader
    pub fn new(null_sentinel: impl Into<String>, normalization: Normalization) -> Self {
        Self {
            null_sentinel: null_sentinel.into(),
            normalization,
        }
    }

    /// Load a profile and its rules
    ///
    /// Without an explicit `rules` path, a sibling `<stem>.rules` file is
    /// used when present.
    pub fn load(&self, profile: &Path, rules: Option<&Path>) -> Result<Profile> {
        let name = profile.display().to_string();
        let table = self.parse_profile(&FileReader::read_text(profile)?, &name)?;

        let rules_path = rules
            .map(Path::to_path_buf)
            .or_else(|| sibling_rules(profile));
        let rules = match &rules_path {
            Some(path) => {
                log::info!("Using rules from {}", path.display());
                self.parse_rules(&FileReader::read_text(path)?, &path.display().to_string())?
            }
            None => Vec::new(),
        };

        let profile = Profile::builder()
            .columns(table.columns)
            .rows(table.rows)
            .rules(rules)
            .null_sentinel(self.null_sentinel.as_str())
            .build()
            .with_context(|| format!("Invalid profile: {name}"))?;

        log::info!(
            "Loaded profile {name}: {} graphemes, {} rules",
            profile.graphemes().len(),
            profile.rules().len()
        );
        Ok(profile)
    }

    /// Build a profile holding only the rules of `path`
    pub fn load_rules_only(&self, path: &Path) -> Result<Profile> {
        let name = path.display().to_string();
        let rules = self.parse_rules(&FileReader::read_text(path)?, &name)?;
        Profile::builder()
            .rules(rules)
            .build()
            .with_context(|| format!("Invalid rules file: {name}"))
    }

    /// Parse the tab-separated profile format
    pub fn parse_profile(&self, content: &str, name: &str) -> Result<ProfileTable> {
        let mut lines = non_blank_lines(content);

        let (header_line, header) = lines.next().ok_or_else(|| CliError::ProfileFormat {
            path: name.to_string(),
            line: 1,
            message: "missing header row".to_string(),
        })?;
        let header: Vec<String> = header.split('\t').map(|h| h.trim().to_string()).collect();
        let grapheme_index = header
            .iter()
            .position(|h| h == GRAPHEME_COLUMN)
            .ok_or_else(|| CliError::ProfileFormat {
                path: name.to_string(),
                line: header_line,
                message: format!("header has no '{GRAPHEME_COLUMN}' column"),
            })?;

        let mut rows = Vec::new();
        for (line_number, line) in lines {
            let cells: Vec<&str> = line.split('\t').collect();
            if cells.len() > header.len() {
                return Err(CliError::ProfileFormat {
                    path: name.to_string(),
                    line: line_number,
                    message: format!(
                        "expected at most {} cells, found {}",
                        header.len(),
                        cells.len()
                    ),
                }
                .into());
            }

            let pattern = cells.get(grapheme_index).copied().unwrap_or_default();
            let mut row = ProfileRow::new(self.normalization.apply(pattern));
            for (column, cell) in header.iter().zip(&cells) {
                if column != GRAPHEME_COLUMN && !cell.is_empty() {
                    row = row.with(column.as_str(), self.normalization.apply(cell));
                }
            }
            rows.push(row);
        }

        let columns = header
            .into_iter()
            .filter(|h| h != GRAPHEME_COLUMN)
            .collect();
        Ok(ProfileTable { columns, rows })
    }

    /// Parse a rules file
    pub fn parse_rules(&self, content: &str, name: &str) -> Result<Vec<RuleRow>> {
        non_blank_lines(content)
            .filter(|(_, line)| !line.starts_with('#'))
            .map(|(line_number, line)| -> Result<RuleRow> {
                let format_error = |message: &str| CliError::ProfileFormat {
                    path: name.to_string(),
                    line: line_number,
                    message: message.to_string(),
                };
                let mut fields = split_rule_fields(line).map_err(format_error)?;
                if fields.len() < 2 {
                    return Err(format_error("expected 'pattern,replacement'").into());
                }
                let replacement = fields.pop().unwrap_or_default();
                let pattern = fields.join(",");
                Ok(RuleRow::new(
                    self.normalization.apply(&pattern),
                    self.normalization.apply(&replacement),
                ))
            })
            .collect()
    }
}

/// `<stem>.rules` next to `profile`, if it exists
pub fn sibling_rules(profile: &Path) -> Option<PathBuf> {
    let candidate = profile.with_extension(RULES_EXTENSION);
    (candidate != profile && candidate.is_file()).then_some(candidate)
}

/// Non-blank lines with their 1-based line numbers
fn non_blank_lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim_end_matches('\r')))
        .filter(|(_, line)| !line.trim().is_empty())
}

/// Comma-separated fields of a rules line, honouring double-quoted fields
fn split_rule_fields(line: &str) -> std::result::Result<Vec<String>, &'static str> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut at_field_start = true;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if at_field_start => {
                loop {
                    match chars.next() {
                        Some('"') if chars.peek() == Some(&'"') => {
                            chars.next();
                            field.push('"');
                        }
                        Some('"') => break,
                        Some(c) => field.push(c),
                        None => return Err("unterminated quoted field"),
                    }
                }
                if !matches!(chars.peek(), None | Some(',')) {
                    return Err("unexpected text after quoted field");
                }
                at_field_start = false;
            }
            ',' => {
                fields.push(std::mem::take(&mut field));
                at_field_start = true;
            }
            c => {
                field.push(c);
                at_field_start = false;
            }
        }
    }
    fields.push(field);
    Ok(fields)
}

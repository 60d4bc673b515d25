//! Grapheme table with trie-backed longest-match lookup
//!
//! Patterns are stored in declaration order and indexed by a character trie
//! kept in one contiguous node array. A lookup walks the trie from the
//! starting position and remembers the last terminal node it passed, so the
//! work per position is bounded by the longest pattern, not by the table size.

use std::collections::HashMap;

use crate::error::ProfileError;
use crate::profile::row::Mapping;

/// A recognised surface unit and its per-column outputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grapheme {
    pattern: String,
    row: usize,
    mappings: Vec<Option<Mapping>>,
}

impl Grapheme {
    /// Create a grapheme; `mappings` is indexed by profile column position
    pub fn new(pattern: impl Into<String>, row: usize, mappings: Vec<Option<Mapping>>) -> Self {
        Self {
            pattern: pattern.into(),
            row,
            mappings,
        }
    }

    /// The surface pattern
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// 1-based row the grapheme was declared in
    pub fn row(&self) -> usize {
        self.row
    }

    /// Mapping for a column index, `None` when the row left it unset
    pub fn mapping(&self, column: usize) -> Option<&Mapping> {
        self.mappings.get(column).and_then(Option::as_ref)
    }

    /// Pattern length in characters
    pub fn char_len(&self) -> usize {
        self.pattern.chars().count()
    }
}

/// Trie node; children hold indices into the node array
#[derive(Debug, Clone, Default)]
struct TrieNode {
    children: HashMap<char, u32>,
    /// Index of the grapheme ending here
    grapheme: Option<u32>,
}

/// Ordered, duplicate-free collection of graphemes
#[derive(Debug, Clone)]
pub struct GraphemeTable {
    graphemes: Vec<Grapheme>,
    nodes: Vec<TrieNode>,
    max_pattern_chars: usize,
}

impl Default for GraphemeTable {
    fn default() -> Self {
        Self {
            graphemes: Vec::new(),
            nodes: vec![TrieNode::default()],
            max_pattern_chars: 0,
        }
    }
}

impl GraphemeTable {
    /// Build the table, failing on empty or duplicate patterns
    pub fn build(graphemes: impl IntoIterator<Item = Grapheme>) -> Result<Self, ProfileError> {
        let mut table = Self::default();
        for grapheme in graphemes {
            table.insert(grapheme)?;
        }
        Ok(table)
    }

    fn insert(&mut self, grapheme: Grapheme) -> Result<(), ProfileError> {
        if grapheme.pattern.is_empty() {
            return Err(ProfileError::EmptyPattern { row: grapheme.row });
        }

        let mut current_idx = 0u32;
        for ch in grapheme.pattern.chars() {
            let next_idx = match self.nodes[current_idx as usize].children.get(&ch) {
                Some(&child_idx) => child_idx,
                None => {
                    let new_idx = self.nodes.len() as u32;
                    self.nodes.push(TrieNode::default());
                    self.nodes[current_idx as usize]
                        .children
                        .insert(ch, new_idx);
                    new_idx
                }
            };
            current_idx = next_idx;
        }

        let node = &mut self.nodes[current_idx as usize];
        if let Some(existing) = node.grapheme {
            return Err(ProfileError::DuplicatePattern {
                pattern: grapheme.pattern,
                row: grapheme.row,
                first: self.graphemes[existing as usize].row,
            });
        }
        node.grapheme = Some(self.graphemes.len() as u32);

        self.max_pattern_chars = self.max_pattern_chars.max(grapheme.char_len());
        self.graphemes.push(grapheme);
        Ok(())
    }

    /// Number of graphemes
    pub fn len(&self) -> usize {
        self.graphemes.len()
    }

    /// Whether the table holds no graphemes
    pub fn is_empty(&self) -> bool {
        self.graphemes.is_empty()
    }

    /// Graphemes in declaration order
    pub fn graphemes(&self) -> &[Grapheme] {
        &self.graphemes
    }

    /// Length in characters of the longest pattern
    pub fn max_pattern_chars(&self) -> usize {
        self.max_pattern_chars
    }

    /// Exact lookup by pattern
    pub fn get(&self, pattern: &str) -> Option<&Grapheme> {
        let mut node = 0usize;
        for ch in pattern.chars() {
            node = *self.nodes[node].children.get(&ch)? as usize;
        }
        self.nodes[node]
            .grapheme
            .map(|idx| &self.graphemes[idx as usize])
    }

    /// Longest grapheme matching `text` at byte `position`
    ///
    /// Patterns are unique, so at most one pattern of each length can match at
    /// a position and the length order alone decides.
    pub fn longest_match_at(&self, text: &str, position: usize) -> Option<&Grapheme> {
        self.longest_match_where(text, position, |_| true)
            .map(|(grapheme, _)| grapheme)
    }

    /// Longest match whose end offset is accepted by `accept_end`
    ///
    /// Returns the grapheme and the byte offset where the match ends.
    pub(crate) fn longest_match_where<F>(
        &self,
        text: &str,
        position: usize,
        accept_end: F,
    ) -> Option<(&Grapheme, usize)>
    where
        F: Fn(usize) -> bool,
    {
        let rest = text.get(position..)?;
        let mut node = 0usize;
        let mut best = None;

        for (offset, ch) in rest.char_indices() {
            match self.nodes[node].children.get(&ch) {
                Some(&next) => node = next as usize,
                None => break,
            }

            if let Some(idx) = self.nodes[node].grapheme {
                let end = position + offset + ch.len_utf8();
                if accept_end(end) {
                    best = Some((idx, end));
                }
            }
        }

        best.map(|(idx, end)| (&self.graphemes[idx as usize], end))
    }
}

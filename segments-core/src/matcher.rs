//! Greedy longest-match segmentation of a single word

use crate::cluster::unit_ends;
use crate::config::SegmentationMode;
use crate::profile::{Grapheme, GraphemeTable};

/// One matcher step: a matched grapheme or a single fallback unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'t, 'p> {
    /// Consumed text
    pub surface: &'t str,
    /// Byte offset of the token start in the rewritten text
    pub start: usize,
    /// Byte offset one past the token end in the rewritten text
    pub end: usize,
    /// The grapheme that matched, `None` for a fallback unit
    pub grapheme: Option<&'p Grapheme>,
}

impl Token<'_, '_> {
    /// Consumed length in bytes
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether nothing was consumed (never true for emitted tokens)
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether a grapheme of the profile matched
    pub fn is_matched(&self) -> bool {
        self.grapheme.is_some()
    }
}

/// Maximal-munch matcher over a grapheme table
///
/// At every position the longest grapheme ending on a unit boundary wins;
/// when none matches, one unit is consumed as a fallback token. Decisions are
/// never revisited.
#[derive(Debug, Clone, Copy)]
pub struct Matcher<'p> {
    table: &'p GraphemeTable,
    mode: SegmentationMode,
}

impl<'p> Matcher<'p> {
    /// Create a matcher
    pub fn new(table: &'p GraphemeTable, mode: SegmentationMode) -> Self {
        Self { table, mode }
    }

    /// Segment one word; `offset` is the word's byte offset in the rewritten text
    pub fn tokens<'t>(&self, word: &'t str, offset: usize) -> Vec<Token<'t, 'p>> {
        let ends = unit_ends(word, self.mode);
        let mut tokens = Vec::with_capacity(ends.len());
        let mut position = 0;

        while position < word.len() {
            let found = self
                .table
                .longest_match_where(word, position, |end| ends.binary_search(&end).is_ok());

            let (grapheme, end) = match found {
                Some((grapheme, end)) => (Some(grapheme), end),
                None => {
                    let next = ends.partition_point(|&end| end <= position);
                    (None, ends.get(next).copied().unwrap_or(word.len()))
                }
            };

            tokens.push(Token {
                surface: &word[position..end],
                start: offset + position,
                end: offset + end,
                grapheme,
            });
            position = end;
        }

        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(patterns: &[&str]) -> GraphemeTable {
        GraphemeTable::build(
            patterns
                .iter()
                .enumerate()
                .map(|(i, p)| Grapheme::new(*p, i + 1, Vec::new())),
        )
        .unwrap()
    }

    fn surfaces(table: &GraphemeTable, mode: SegmentationMode, word: &str) -> Vec<String> {
        Matcher::new(table, mode)
            .tokens(word, 0)
            .into_iter()
            .map(|t| t.surface.to_string())
            .collect()
    }

    #[test]
    fn test_longest_match_wins() {
        let table = table(&["a", "aa"]);
        assert_eq!(surfaces(&table, SegmentationMode::Character, "aa"), vec!["aa"]);
        assert_eq!(
            surfaces(&table, SegmentationMode::Character, "aaa"),
            vec!["aa", "a"]
        );
    }

    #[test]
    fn test_greedy_never_backtracks() {
        // "ab" + "cd" would cover the word, but greedy takes "abc" first
        let table = table(&["ab", "abc", "cd"]);
        assert_eq!(
            surfaces(&table, SegmentationMode::Character, "abcd"),
            vec!["abc", "d"]
        );
    }

    #[test]
    fn test_fallback_consumes_one_character() {
        let table = table(&["t", "o", "oː"]);
        let tokens = Matcher::new(&table, SegmentationMode::Character).tokens("toːt=oː", 0);
        let shape: Vec<_> = tokens.iter().map(|t| (t.surface, t.is_matched())).collect();
        assert_eq!(
            shape,
            vec![
                ("t", true),
                ("oː", true),
                ("t", true),
                ("=", false),
                ("oː", true)
            ]
        );
    }

    #[test]
    fn test_token_offsets_include_word_offset() {
        let table = table(&["ch"]);
        let tokens = Matcher::new(&table, SegmentationMode::Character).tokens("chä", 10);
        assert_eq!(tokens[0].start, 10);
        assert_eq!(tokens[0].end, 12);
        assert_eq!(tokens[1].start, 12);
        assert_eq!(tokens[1].end, 14);
        assert_eq!(tokens.iter().map(Token::len).sum::<usize>(), "chä".len());
    }

    #[test]
    fn test_match_cannot_split_cluster() {
        // "n" alone would cut "n\u{303}" in half
        let table = table(&["n", "a"]);
        assert_eq!(
            surfaces(&table, SegmentationMode::Character, "n\u{303}a"),
            vec!["n", "\u{303}", "a"]
        );
        let tokens = Matcher::new(&table, SegmentationMode::Grapheme).tokens("n\u{303}a", 0);
        assert_eq!(tokens[0].surface, "n\u{303}");
        assert!(!tokens[0].is_matched());
        assert_eq!(tokens[1].surface, "a");
        assert!(tokens[1].is_matched());
    }

    #[test]
    fn test_match_may_span_whole_clusters() {
        let table = table(&["t\u{361}s", "a"]);
        assert_eq!(
            surfaces(&table, SegmentationMode::Phonetic, "t\u{361}sa"),
            vec!["t\u{361}s", "a"]
        );
        let table = self::table(&["ts"]);
        assert_eq!(
            surfaces(&table, SegmentationMode::Phonetic, "tsʰ"),
            vec!["t", "sʰ"]
        );
    }

    #[test]
    fn test_empty_table_splits_into_units() {
        let table = GraphemeTable::default();
        assert_eq!(
            surfaces(&table, SegmentationMode::Phonetic, "kʰa"),
            vec!["kʰ", "a"]
        );
        assert!(surfaces(&table, SegmentationMode::Phonetic, "").is_empty());
    }
}

//! Partitioning of words into indivisible matching units
//!
//! The matcher never lets a grapheme match end inside a unit, and an
//! unmatched position consumes exactly one unit. What a unit is depends on
//! the [`SegmentationMode`].

pub mod tables;

use unicode_segmentation::UnicodeSegmentation;

use crate::config::SegmentationMode;
use tables::{classify, is_tie_bar, IpaClass};

/// Byte offsets at which the units of `word` end, ascending, last is `word.len()`
pub fn unit_ends(word: &str, mode: SegmentationMode) -> Vec<usize> {
    match mode {
        SegmentationMode::Character => word
            .char_indices()
            .map(|(start, ch)| start + ch.len_utf8())
            .collect(),
        SegmentationMode::Grapheme => word
            .grapheme_indices(true)
            .map(|(start, cluster)| start + cluster.len())
            .collect(),
        SegmentationMode::Phonetic => phonetic_units(word)
            .into_iter()
            .map(|unit| unit.end)
            .collect(),
    }
}

/// Split `word` into its units
pub fn split_units(word: &str, mode: SegmentationMode) -> Vec<&str> {
    let mut start = 0;
    unit_ends(word, mode)
        .into_iter()
        .map(|end| {
            let unit = &word[start..end];
            start = end;
            unit
        })
        .collect()
}

#[derive(Debug, Clone, Copy)]
struct Unit {
    start: usize,
    end: usize,
    tone: bool,
}

/// Merge extended grapheme clusters into IPA segments
///
/// Modifier letters join the preceding unit (or the following one at word
/// start), stress marks join the following unit, adjacent tone letters join
/// each other, and a unit ending in a tie bar absorbs the next unit.
fn phonetic_units(word: &str) -> Vec<Unit> {
    let mut units: Vec<Unit> = Vec::new();
    // Start of leading material waiting for a base
    let mut pending: Option<usize> = None;

    for (start, cluster) in word.grapheme_indices(true) {
        let end = start + cluster.len();
        let mut chars = cluster.chars();
        let class = match (chars.next(), chars.next()) {
            (Some(ch), None) => classify(ch),
            _ => IpaClass::Base,
        };

        match class {
            IpaClass::Stress => {
                pending.get_or_insert(start);
                continue;
            }
            IpaClass::Modifier => {
                match (pending, units.last_mut()) {
                    (None, Some(last)) => last.end = end,
                    _ => {
                        pending.get_or_insert(start);
                    }
                }
                continue;
            }
            IpaClass::Tone => {
                if let (None, Some(last)) = (pending, units.last_mut()) {
                    if last.tone {
                        last.end = end;
                        continue;
                    }
                }
            }
            IpaClass::Base => {
                if let (None, Some(last)) = (pending, units.last_mut()) {
                    if word[last.start..last.end].chars().last().is_some_and(is_tie_bar) {
                        last.end = end;
                        last.tone = false;
                        continue;
                    }
                }
            }
        }

        units.push(Unit {
            start: pending.take().unwrap_or(start),
            end,
            tone: class == IpaClass::Tone,
        });
    }

    // Trailing stress marks or a word made only of modifiers
    if let Some(start) = pending {
        units.push(Unit {
            start,
            end: word.len(),
            tone: false,
        });
    }

    units
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phonetic(word: &str) -> Vec<&str> {
        split_units(word, SegmentationMode::Phonetic)
    }

    #[test]
    fn test_character_units() {
        assert_eq!(
            split_units("n\u{0303}a", SegmentationMode::Character),
            vec!["n", "\u{0303}", "a"]
        );
        assert_eq!(unit_ends("aä", SegmentationMode::Character), vec![1, 3]);
    }

    #[test]
    fn test_grapheme_units_keep_combining_marks() {
        assert_eq!(
            split_units("n\u{0303}a", SegmentationMode::Grapheme),
            vec!["n\u{0303}", "a"]
        );
        assert_eq!(
            split_units("ĉháɾã̌ctʼɛ↗ʐː|", SegmentationMode::Grapheme),
            vec!["ĉ", "h", "á", "ɾ", "ã̌", "c", "t", "ʼ", "ɛ", "↗", "ʐ", "ː", "|"]
        );
    }

    #[test]
    fn test_modifiers_attach_to_preceding_unit() {
        assert_eq!(phonetic("kʰaː"), vec!["kʰ", "aː"]);
        assert_eq!(phonetic("tʼɛ"), vec!["tʼ", "ɛ"]);
    }

    #[test]
    fn test_leading_modifier_attaches_to_following_unit() {
        assert_eq!(phonetic("\u{02b0}ello"), vec!["\u{02b0}e", "l", "l", "o"]);
    }

    #[test]
    fn test_stress_marks_attach_to_following_unit() {
        assert_eq!(phonetic("ˈtaˌta"), vec!["ˈt", "a", "ˌt", "a"]);
    }

    #[test]
    fn test_tone_letters_group() {
        assert_eq!(phonetic("ma˥˩"), vec!["m", "a", "˥˩"]);
        assert_eq!(phonetic("˧a"), vec!["˧", "a"]);
    }

    #[test]
    fn test_tie_bar_joins_units() {
        assert_eq!(phonetic("k\u{0361}pa"), vec!["k\u{0361}p", "a"]);
        assert_eq!(phonetic("t\u{035C}sa"), vec!["t\u{035C}s", "a"]);
    }

    #[test]
    fn test_trailing_stress_and_empty_word() {
        assert_eq!(phonetic("aˈ"), vec!["a", "ˈ"]);
        assert_eq!(phonetic("ː"), vec!["ː"]);
        assert!(phonetic("").is_empty());
    }

    #[test]
    fn test_units_cover_word() {
        for word in ["ĉháɾã̌ctʼɛ↗ʐː|", "k\u{0361}pˈaː˥˩", "ʰʰa"] {
            let ends = unit_ends(word, SegmentationMode::Phonetic);
            assert_eq!(ends.last().copied(), Some(word.len()));
            assert!(ends.windows(2).all(|w| w[0] < w[1]));
        }
    }
}

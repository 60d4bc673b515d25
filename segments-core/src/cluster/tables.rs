//! Fixed character classification for phonetic (IPA) units
//!
//! Only characters that change how clusters are merged are classified; all
//! other characters are [`IpaClass::Base`].

/// Role of a character when merging grapheme clusters into IPA units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpaClass {
    /// Ordinary character, starts a new unit
    Base,
    /// Spacing modifier letter, attaches to the preceding unit
    Modifier,
    /// Primary or secondary stress mark, attaches to the following unit
    Stress,
    /// Tone letter; adjacent tone letters form one unit
    Tone,
}

/// U+02C8 MODIFIER LETTER VERTICAL LINE
pub const PRIMARY_STRESS: char = '\u{02C8}';

/// U+02CC MODIFIER LETTER LOW VERTICAL LINE
pub const SECONDARY_STRESS: char = '\u{02CC}';

/// U+0361 COMBINING DOUBLE INVERTED BREVE
pub const TIE_BAR_ABOVE: char = '\u{0361}';

/// U+035C COMBINING DOUBLE BREVE BELOW
pub const TIE_BAR_BELOW: char = '\u{035C}';

/// Classify a character
#[inline]
pub fn classify(ch: char) -> IpaClass {
    match ch {
        PRIMARY_STRESS | SECONDARY_STRESS => IpaClass::Stress,
        '\u{02E5}'..='\u{02E9}' => IpaClass::Tone,
        _ if is_modifier_letter(ch) => IpaClass::Modifier,
        _ => IpaClass::Base,
    }
}

/// Whether `ch` is a tie bar joining two units
#[inline]
pub fn is_tie_bar(ch: char) -> bool {
    ch == TIE_BAR_ABOVE || ch == TIE_BAR_BELOW
}

/// Spacing modifier letters (general category Lm) used in phonetic notation
fn is_modifier_letter(ch: char) -> bool {
    matches!(
        ch,
        '\u{02B0}'..='\u{02C1}'
            | '\u{02C6}'..='\u{02D1}'
            | '\u{02E0}'..='\u{02E4}'
            | '\u{02EC}'
            | '\u{02EE}'
            | '\u{1D2C}'..='\u{1D6A}'
            | '\u{1D78}'
            | '\u{1D9B}'..='\u{1DBF}'
            | '\u{2071}'
            | '\u{207F}'
            | '\u{2090}'..='\u{209C}'
            | '\u{A69C}'..='\u{A69D}'
            | '\u{A770}'
            | '\u{A7F8}'..='\u{A7F9}'
            | '\u{AB5C}'..='\u{AB5F}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_ipa_characters() {
        assert_eq!(classify('ʰ'), IpaClass::Modifier);
        assert_eq!(classify('ʷ'), IpaClass::Modifier);
        assert_eq!(classify('ː'), IpaClass::Modifier);
        assert_eq!(classify('ʼ'), IpaClass::Modifier);
        assert_eq!(classify('ⁿ'), IpaClass::Modifier);
        assert_eq!(classify('ˈ'), IpaClass::Stress);
        assert_eq!(classify('ˌ'), IpaClass::Stress);
        assert_eq!(classify('˥'), IpaClass::Tone);
        assert_eq!(classify('˩'), IpaClass::Tone);
        assert_eq!(classify('a'), IpaClass::Base);
        assert_eq!(classify('ɛ'), IpaClass::Base);
        assert_eq!(classify('↗'), IpaClass::Base);
    }

    #[test]
    fn test_tie_bars() {
        assert!(is_tie_bar('\u{0361}'));
        assert!(is_tie_bar('\u{035C}'));
        assert!(!is_tie_bar('\u{0303}'));
    }
}

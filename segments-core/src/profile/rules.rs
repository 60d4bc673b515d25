//! Ordered regex rewrite rules applied before segmentation

use std::borrow::Cow;

use regex::Regex;

use crate::error::ProfileError;
use crate::profile::row::RuleRow;

/// A compiled rewrite rule
#[derive(Debug, Clone)]
struct Rule {
    regex: Regex,
    replacement: String,
}

/// Rules compiled once, applied in declaration order
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Compile rule rows; the first invalid pattern aborts compilation
    pub fn compile(rows: impl IntoIterator<Item = RuleRow>) -> Result<Self, ProfileError> {
        let rules = rows
            .into_iter()
            .enumerate()
            .map(|(i, row)| {
                let regex = Regex::new(&row.pattern).map_err(|source| ProfileError::InvalidRule {
                    index: i + 1,
                    pattern: row.pattern.clone(),
                    source,
                })?;
                Ok(Rule {
                    regex,
                    replacement: expand_backreferences(&row.replacement),
                })
            })
            .collect::<Result<Vec<_>, ProfileError>>()?;

        Ok(Self { rules })
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether there are no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Source patterns in application order
    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|rule| rule.regex.as_str())
    }

    /// Apply every rule once, each to the previous rule's output
    pub fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        let mut current = Cow::Borrowed(text);

        for rule in &self.rules {
            let rewritten = match rule.regex.replace_all(&current, rule.replacement.as_str()) {
                Cow::Owned(rewritten) => Some(rewritten),
                Cow::Borrowed(_) => None,
            };

            if let Some(rewritten) = rewritten {
                log::trace!("rule /{}/ rewrote {:?} -> {:?}", rule.regex, current, rewritten);
                current = Cow::Owned(rewritten);
            }
        }

        current
    }
}

/// Rewrite `\1`-style group references into the `${1}` form the regex crate expands
///
/// `\\` produces a literal backslash; any other backslash is kept as is.
fn expand_backreferences(template: &str) -> String {
    let mut expanded = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            expanded.push(ch);
            continue;
        }

        match chars.peek().copied() {
            Some(digit) if digit.is_ascii_digit() => {
                chars.next();
                expanded.push_str("${");
                expanded.push(digit);
                expanded.push('}');
            }
            Some('\\') => {
                chars.next();
                expanded.push('\\');
            }
            _ => expanded.push('\\'),
        }
    }

    expanded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rules_apply_in_order() {
        let rules = RuleSet::compile(vec![RuleRow::new("a", "b"), RuleRow::new("b", "c")]).unwrap();
        // The first rule's output feeds the second
        assert_eq!(rules.apply("ab"), "cc");
    }

    #[test]
    fn test_single_pass_not_fixed_point() {
        let rules = RuleSet::compile(vec![RuleRow::new("ab", "aab")]).unwrap();
        assert_eq!(rules.apply("ab"), "aab");
    }

    #[test]
    fn test_boundary_marker_injection() {
        let rules = RuleSet::compile(vec![
            RuleRow::new(r"(\S+)", "^$1"),
            RuleRow::new(r"(\S)(\s|\z)", "$1$$$2"),
        ])
        .unwrap();
        assert_eq!(rules.apply("ath ta"), "^ath$ ^ta$");
    }

    #[test]
    fn test_backslash_references() {
        let rules = RuleSet::compile(vec![RuleRow::new(
            r"(a|e|i|o|u)(n)(\s)(a|e|i|o|u)",
            r"\1 \2 \4",
        )])
        .unwrap();
        assert_eq!(rules.apply("an a"), "a n a");
    }

    #[test]
    fn test_expand_backreferences() {
        assert_eq!(expand_backreferences(r"\1-\2"), "${1}-${2}");
        assert_eq!(expand_backreferences(r"\\1"), r"\1");
        assert_eq!(expand_backreferences(r"a\b"), r"a\b");
        assert_eq!(expand_backreferences("$1"), "$1");
    }

    #[test]
    fn test_unchanged_text_stays_borrowed() {
        let rules = RuleSet::compile(vec![RuleRow::new("x", "y")]).unwrap();
        assert!(matches!(rules.apply("abc"), Cow::Borrowed("abc")));
        assert!(RuleSet::default().is_empty());
    }

    #[test]
    fn test_invalid_pattern_reports_index() {
        let result = RuleSet::compile(vec![RuleRow::new("a", "b"), RuleRow::new("(", "x")]);
        match result {
            Err(ProfileError::InvalidRule { index, pattern, .. }) => {
                assert_eq!(index, 2);
                assert_eq!(pattern, "(");
            }
            other => panic!("Expected InvalidRule, got {other:?}"),
        }
    }
}

//! Raw profile records as supplied by a loader

/// One grapheme entry: a surface pattern plus named column values
///
/// Values are kept as raw strings; the NULL sentinel is interpreted when the
/// profile is built, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRow {
    /// Surface form to match
    pub pattern: String,
    /// Ordered (column, value) pairs
    pub values: Vec<(String, String)>,
}

impl ProfileRow {
    /// Create a row with no mapping values
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            values: Vec::new(),
        }
    }

    /// Add a column value
    pub fn with(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.push((column.into(), value.into()));
        self
    }

    /// Look up the raw value of a column (last occurrence wins)
    pub fn value(&self, column: &str) -> Option<&str> {
        self.values
            .iter()
            .rev()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }
}

/// One rewrite rule: a regular expression and its replacement template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleRow {
    /// Regular expression source
    pub pattern: String,
    /// Replacement template
    pub replacement: String,
}

impl RuleRow {
    /// Create a rule row
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }
}

/// Output of a grapheme for one column
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mapping {
    /// Emit this string
    Value(String),
    /// Emit nothing
    Null,
}

impl Mapping {
    /// Interpret a raw cell against the NULL sentinel (case-insensitive)
    pub fn parse(raw: &str, null_sentinel: &str) -> Self {
        if raw.eq_ignore_ascii_case(null_sentinel) {
            Mapping::Null
        } else {
            Mapping::Value(raw.to_string())
        }
    }

    /// The emitted text, `None` for [`Mapping::Null`]
    pub fn as_output(&self) -> Option<&str> {
        match self {
            Mapping::Value(value) => Some(value),
            Mapping::Null => None,
        }
    }
}

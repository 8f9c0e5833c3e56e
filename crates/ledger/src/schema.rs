use billing_core::MAX_IDENTIFIER_LEN;
use billing_core::TABLE_PREFIX;
use regex::Regex;

/// Validated schema name that owns a family of `t_<schema>_<n>` partitions.
///
/// Only ASCII letters, digits and underscores are accepted, so the name
/// can be embedded in a table pattern or a quoted identifier as-is.
#[derive(Debug, Clone)]
pub struct Schema {
    name: String,
    pattern: Regex,
}

impl Schema {
    pub fn name(&self) -> &str {
        &self.name
    }
    /// Double-quoted identifier, preserving case.
    pub fn quoted(&self) -> String {
        quote(&self.name)
    }
    /// Trailing digit run of `table`, if it is one of this schema's partitions.
    pub fn suffix<'a>(&self, table: &'a str) -> Option<&'a str> {
        self.pattern
            .captures(table)
            .and_then(|captures| captures.get(1))
            .map(|digits| digits.as_str())
    }
}

/// Quotes an identifier for PostgreSQL, doubling embedded quotes.
pub(crate) fn quote(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}

impl TryFrom<&str> for Schema {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        if s.is_empty() || s.len() > MAX_IDENTIFIER_LEN {
            return Err(format!("schema name must be 1-{} characters", MAX_IDENTIFIER_LEN));
        }
        if !s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(format!("invalid schema name: {:?}", s));
        }
        let pattern = format!("^{}{}_([0-9]+)$", TABLE_PREFIX, regex::escape(s));
        Regex::new(&pattern)
            .map(|pattern| Self {
                name: s.to_string(),
                pattern,
            })
            .map_err(|e| format!("invalid schema pattern: {}", e))
    }
}

impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}
impl Eq for Schema {}

impl std::fmt::Display for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

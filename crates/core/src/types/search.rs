//! Free-text search over news items.

/// A case-insensitive substring filter.
///
/// The term is matched literally: `%`, `_` and `\` are escaped so they are
/// not treated as `LIKE` wildcards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    term: String,
}

impl SearchFilter {
    /// Build a filter from a raw `search` query value.
    ///
    /// Returns `None` when the value is missing or blank, meaning "no filter".
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        let term = raw?.trim();
        if term.is_empty() {
            return None;
        }
        Some(Self {
            term: term.to_owned(),
        })
    }

    /// The trimmed search term as entered.
    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    /// `ILIKE` pattern matching the term anywhere in a column.
    #[must_use]
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.term.len() + 2);
        pattern.push('%');
        for c in self.term.chars() {
            if matches!(c, '%' | '_' | '\\') {
                pattern.push('\\');
            }
            pattern.push(c);
        }
        pattern.push('%');
        pattern
    }
}

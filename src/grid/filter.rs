//! Grid filter predicate compiler
//!
//! A filter is (column, operator, text). Substring operators match the
//! regex-escaped literal text; prefix/suffix and equality operators
//! compare literally. An empty filter text matches everything, which
//! resets the grid to its full backing sequence.

use regex::Regex;

/// Supported filter operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterOp {
    #[default]
    Contains,
    NotContains,
    StartsWith,
    EndsWith,
    Equals,
    NotEquals,
}

impl FilterOp {
    pub const ALL: [FilterOp; 6] = [
        FilterOp::Contains,
        FilterOp::NotContains,
        FilterOp::StartsWith,
        FilterOp::EndsWith,
        FilterOp::Equals,
        FilterOp::NotEquals,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FilterOp::Contains => "contains",
            FilterOp::NotContains => "not contains",
            FilterOp::StartsWith => "starts with",
            FilterOp::EndsWith => "ends with",
            FilterOp::Equals => "equals",
            FilterOp::NotEquals => "not equals",
        }
    }

    /// The next operator in display order, wrapping around
    pub fn cycled(self) -> FilterOp {
        let position = Self::ALL.iter().position(|op| *op == self).unwrap_or(0);
        Self::ALL[(position + 1) % Self::ALL.len()]
    }
}

/// Current filter state of one grid instance
#[derive(Debug, Clone, Default)]
pub struct FilterSpec {
    /// Index into the grid's column list
    pub column: usize,
    pub op: FilterOp,
    pub text: String,
}

impl FilterSpec {
    /// Compile the current state into a reusable predicate
    pub fn compile(&self) -> CompiledFilter {
        let matcher = if self.text.is_empty() {
            Matcher::All
        } else {
            match self.op {
                FilterOp::Contains | FilterOp::NotContains => {
                    // Escaped, so filter text is always a literal.
                    match Regex::new(&regex::escape(&self.text)) {
                        Ok(pattern) => Matcher::Pattern(pattern),
                        Err(_) => Matcher::All,
                    }
                }
                _ => Matcher::Literal(self.text.clone()),
            }
        };
        CompiledFilter {
            op: self.op,
            matcher,
        }
    }
}

#[derive(Debug, Clone)]
enum Matcher {
    All,
    Pattern(Regex),
    Literal(String),
}

/// A compiled predicate over stringified cell values
#[derive(Debug, Clone)]
pub struct CompiledFilter {
    op: FilterOp,
    matcher: Matcher,
}

impl CompiledFilter {
    pub fn matches(&self, cell: &str) -> bool {
        match (&self.matcher, self.op) {
            (Matcher::All, _) => true,
            (Matcher::Pattern(pattern), FilterOp::Contains) => pattern.is_match(cell),
            (Matcher::Pattern(pattern), FilterOp::NotContains) => !pattern.is_match(cell),
            (Matcher::Literal(text), FilterOp::StartsWith) => cell.starts_with(text.as_str()),
            (Matcher::Literal(text), FilterOp::EndsWith) => cell.ends_with(text.as_str()),
            (Matcher::Literal(text), FilterOp::Equals) => cell == text,
            (Matcher::Literal(text), FilterOp::NotEquals) => cell != text,
            // Matcher and operator are built together; other pairings
            // cannot occur.
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(op: FilterOp, text: &str) -> CompiledFilter {
        FilterSpec {
            column: 0,
            op,
            text: text.to_string(),
        }
        .compile()
    }

    #[test]
    fn test_contains_is_literal() {
        let compiled = filter(FilterOp::Contains, "a.c");
        assert!(compiled.matches("xa.cx"));
        assert!(!compiled.matches("abc")); // '.' must not act as a wildcard
    }

    #[test]
    fn test_not_contains() {
        let compiled = filter(FilterOp::NotContains, "bob");
        assert!(compiled.matches("alice"));
        assert!(!compiled.matches("bobby"));
    }

    #[test]
    fn test_prefix_suffix_equality() {
        assert!(filter(FilterOp::StartsWith, "Al").matches("Alice"));
        assert!(!filter(FilterOp::StartsWith, "Al").matches("Carol"));
        assert!(filter(FilterOp::EndsWith, "ol").matches("Carol"));
        assert!(filter(FilterOp::Equals, "Bob").matches("Bob"));
        assert!(!filter(FilterOp::Equals, "Bob").matches("Bobby"));
        assert!(filter(FilterOp::NotEquals, "Bob").matches("Bobby"));
    }

    #[test]
    fn test_empty_text_matches_everything() {
        for op in FilterOp::ALL {
            assert!(filter(op, "").matches("anything"));
        }
    }

    #[test]
    fn test_operator_cycle_wraps() {
        let mut op = FilterOp::Contains;
        for _ in 0..FilterOp::ALL.len() {
            op = op.cycled();
        }
        assert_eq!(op, FilterOp::Contains);
    }
}

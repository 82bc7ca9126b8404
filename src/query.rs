use crate::core::PantryError;
use std::ops::Deref;

/// Ordered, normalized query terms. Never empty; no term is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(Vec<String>);

impl Query {
    pub fn terms(&self) -> &[String] {
        &self.0
    }
}

impl Deref for Query {
    type Target = [String];

    fn deref(&self) -> &[String] {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Delimiters {
    pub whitespace: bool,
}

impl Delimiters {
    fn is_delimiter(&self, c: char) -> bool {
        c == ',' || c == '.' || (self.whitespace && c.is_whitespace())
    }
}

pub fn parse_query(raw: &str) -> Result<Query, PantryError> {
    parse_query_with(raw, Delimiters::default())
}

pub fn parse_query_with(raw: &str, delimiters: Delimiters) -> Result<Query, PantryError> {
    let normalized = raw.trim().to_lowercase();
    if normalized.is_empty() {
        return Err(PantryError::InvalidQuery);
    }

    let terms: Vec<String> = normalized
        .split(|c| delimiters.is_delimiter(c))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect();

    if terms.is_empty() {
        return Err(PantryError::InvalidQuery);
    }

    Ok(Query(terms))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_and_delimiter_only_input() {
        for raw in ["", "   ", ",,,", "...", " , . ,"] {
            assert!(
                matches!(parse_query(raw), Err(PantryError::InvalidQuery)),
                "expected {:?} to be rejected",
                raw
            );
        }
    }

    #[test]
    fn normalizes_case_and_whitespace() {
        let q = parse_query("Egg, Flour ").unwrap();
        assert_eq!(q.terms(), ["egg", "flour"]);
    }

    #[test]
    fn drops_empty_terms_between_delimiters() {
        let q = parse_query("milk,, ,sugar,").unwrap();
        assert_eq!(q.terms(), ["milk", "sugar"]);
    }

    #[test]
    fn keeps_multi_word_terms_by_default() {
        let q = parse_query("olive oil, sea salt").unwrap();
        assert_eq!(q.terms(), ["olive oil", "sea salt"]);
    }

    #[test]
    fn whitespace_splitting_is_opt_in() {
        let q = parse_query_with("olive oil, salt", Delimiters { whitespace: true }).unwrap();
        assert_eq!(q.terms(), ["olive", "oil", "salt"]);
    }
}

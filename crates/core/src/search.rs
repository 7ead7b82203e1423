//! Director name search shared by the three backends.
//!
//! A query is split into lowercase words. A professional matches when every
//! word is contained in their first name or in their last name. The
//! relational and document stores push the same rule down as `LIKE` patterns
//! and regular expressions; the wide-column store filters in memory with
//! [`NameQuery::matches_full_name`].

use serde::Serialize;

use crate::error::CoreError;

/// Maximum length of a raw search query.
pub const MAX_QUERY_LEN: usize = 200;

/// A parsed, non-empty director search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NameQuery {
    terms: Vec<String>,
}

impl NameQuery {
    /// Parse user input. Blank input is rejected so no backend is ever asked
    /// an empty question.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        if raw.len() > MAX_QUERY_LEN {
            return Err(CoreError::Validation(format!(
                "Search query must be at most {MAX_QUERY_LEN} characters"
            )));
        }
        let terms: Vec<String> = raw.split_whitespace().map(str::to_lowercase).collect();
        if terms.is_empty() {
            return Err(CoreError::Validation(
                "Search query must not be empty".to_string(),
            ));
        }
        Ok(Self { terms })
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// The query as typed, normalized to single spaces.
    pub fn as_text(&self) -> String {
        self.terms.join(" ")
    }

    /// Every term must appear in the first or the last name.
    pub fn matches(&self, first_name: &str, last_name: &str) -> bool {
        let first = first_name.to_lowercase();
        let last = last_name.to_lowercase();
        self.terms
            .iter()
            .all(|t| first.contains(t.as_str()) || last.contains(t.as_str()))
    }

    /// Same rule for stores that only keep a display name.
    pub fn matches_full_name(&self, full_name: &str) -> bool {
        let (first, last) = split_full_name(full_name);
        self.matches(first, last)
    }

    /// `%term%` patterns for `LOWER(col) LIKE $n`, with `LIKE` wildcards in
    /// the term escaped (default escape character `\`).
    pub fn like_patterns(&self) -> Vec<String> {
        self.terms
            .iter()
            .map(|t| {
                let escaped = t
                    .replace('\\', "\\\\")
                    .replace('%', "\\%")
                    .replace('_', "\\_");
                format!("%{escaped}%")
            })
            .collect()
    }

    /// Literal regular expressions, one per term, for case-insensitive
    /// document matching.
    pub fn regex_patterns(&self) -> Vec<String> {
        self.terms.iter().map(|t| regex::escape(t)).collect()
    }
}

/// Split a display name at its first space: `"Steven Spielberg"` becomes
/// `("Steven", "Spielberg")`, a single word has an empty last name.
pub fn split_full_name(full_name: &str) -> (&str, &str) {
    let trimmed = full_name.trim();
    match trimmed.split_once(' ') {
        Some((first, last)) => (first, last.trim()),
        None => (trimmed, ""),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn parse_lowercases_and_splits() {
        let q = NameQuery::parse("  Steven   SPIELBERG ").unwrap();
        assert_eq!(q.terms(), ["steven", "spielberg"]);
        assert_eq!(q.as_text(), "steven spielberg");
    }

    #[test]
    fn blank_query_is_rejected() {
        assert_matches!(NameQuery::parse(""), Err(CoreError::Validation(_)));
        assert_matches!(NameQuery::parse("   \t"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn overlong_query_is_rejected() {
        let raw = "a".repeat(MAX_QUERY_LEN + 1);
        assert_matches!(NameQuery::parse(&raw), Err(CoreError::Validation(_)));
    }

    #[test]
    fn full_name_matches_first_and_last() {
        let q = NameQuery::parse("steven spielberg").unwrap();
        assert!(q.matches("Steven", "Spielberg"));
        assert!(!q.matches("Steven", "Soderbergh"));
    }

    #[test]
    fn partial_term_matches_either_name() {
        let q = NameQuery::parse("berg").unwrap();
        assert!(q.matches("Steven", "Spielberg"));
        assert!(q.matches("Ingmar", "Bergman"));
        assert!(!q.matches("Martin", "Scorsese"));
    }

    #[test]
    fn unknown_person_matches_nobody() {
        let q = NameQuery::parse("nonexistent person").unwrap();
        let directors = [("Steven", "Spielberg"), ("Greta", "Gerwig")];
        assert!(directors.iter().all(|(f, l)| !q.matches(f, l)));
    }

    #[test]
    fn matches_full_name_splits_display_name() {
        let q = NameQuery::parse("del toro").unwrap();
        assert!(q.matches_full_name("Guillermo del Toro"));
        assert!(!q.matches_full_name("Alfonso Cuaron"));
    }

    #[test]
    fn like_patterns_escape_wildcards() {
        let q = NameQuery::parse("o_hara 100%").unwrap();
        assert_eq!(q.like_patterns(), vec!["%o\\_hara%", "%100\\%%"]);
    }

    #[test]
    fn regex_patterns_are_literal() {
        let q = NameQuery::parse("j.j.").unwrap();
        assert_eq!(q.regex_patterns(), vec!["j\\.j\\."]);
    }

    #[test]
    fn split_single_word_name() {
        assert_eq!(split_full_name("Cher"), ("Cher", ""));
        assert_eq!(split_full_name("Sofia Coppola"), ("Sofia", "Coppola"));
    }
}

//! Shared query parameter types for API handlers.

use oscars_core::error::CoreError;
use oscars_core::search::NameQuery;
use oscars_core::wide_column::UseCase;
use serde::Deserialize;

/// `?use_case=` on movie routes. Only the wide-column backend acts on it.
#[derive(Debug, Default, Deserialize)]
pub struct UseCaseParams {
    pub use_case: Option<String>,
}

impl UseCaseParams {
    /// The requested use case, `category` when absent.
    pub fn use_case(&self) -> Result<UseCase, CoreError> {
        match self.use_case.as_deref().map(str::trim) {
            None | Some("") => Ok(UseCase::default()),
            Some(raw) => raw.parse(),
        }
    }
}

/// `?q=` on director search routes.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

impl SearchParams {
    /// Parse the search text, rejecting an empty query.
    pub fn name_query(&self) -> Result<NameQuery, CoreError> {
        NameQuery::parse(self.q.as_deref().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn missing_use_case_defaults_to_category() {
        assert_eq!(UseCaseParams::default().use_case().unwrap(), UseCase::Category);
        let params = UseCaseParams {
            use_case: Some("votes".to_string()),
        };
        assert_eq!(params.use_case().unwrap(), UseCase::Votes);
    }

    #[test]
    fn unknown_use_case_is_rejected() {
        let params = UseCaseParams {
            use_case: Some("ratings".to_string()),
        };
        assert_matches!(params.use_case(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn blank_search_is_rejected() {
        assert_matches!(SearchParams::default().name_query(), Err(CoreError::Validation(_)));
        let params = SearchParams {
            q: Some("   ".to_string()),
        };
        assert_matches!(params.name_query(), Err(CoreError::Validation(_)));
    }
}

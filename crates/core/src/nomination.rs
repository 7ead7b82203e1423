//! Nomination outcome and credited role shared by the backends.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Stored string for a nomination that did not win.
pub const RESULT_NOMINATED: &str = "Nominated";

/// Stored string for a winning nomination.
pub const RESULT_WINNER: &str = "Winner";

/// Result of a nomination. Serialized with the same capitalisation the three
/// stores use (`"Nominated"` / `"Winner"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NominationResult {
    #[default]
    Nominated,
    Winner,
}

impl NominationResult {
    pub fn as_str(self) -> &'static str {
        match self {
            NominationResult::Nominated => RESULT_NOMINATED,
            NominationResult::Winner => RESULT_WINNER,
        }
    }

    pub fn is_winner(self) -> bool {
        self == NominationResult::Winner
    }

    /// Strict parse used on user input.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "nominated" => Ok(NominationResult::Nominated),
            "winner" => Ok(NominationResult::Winner),
            _ => Err(CoreError::Validation(format!(
                "Invalid nomination result '{value}'. Must be one of: {RESULT_NOMINATED}, {RESULT_WINNER}"
            ))),
        }
    }

    /// Lenient read of a stored value. Anything that is not a winner counts
    /// as a plain nomination, and a missing value is treated the same way.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case(RESULT_WINNER) => NominationResult::Winner,
            _ => NominationResult::Nominated,
        }
    }
}

impl fmt::Display for NominationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Part a professional played in a movie, as recorded by the relational store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Actor,
    Director,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Actor => "Actor",
            Role::Director => "Director",
        }
    }

    /// Role implied by a credited nomination's category. Categories such as
    /// "Best Picture" credit no particular role.
    pub fn for_category(category: &str) -> Option<Self> {
        let category = category.to_ascii_lowercase();
        if category.contains("direct") {
            Some(Role::Director)
        } else if category.contains("actor") || category.contains("actress") {
            Some(Role::Actor)
        } else {
            None
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(NominationResult::parse("WINNER").unwrap(), NominationResult::Winner);
        assert_eq!(
            NominationResult::parse(" nominated ").unwrap(),
            NominationResult::Nominated
        );
    }

    #[test]
    fn parse_rejects_unknown() {
        assert_matches!(NominationResult::parse("won"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn stored_values_default_to_nominated() {
        assert_eq!(NominationResult::from_stored(None), NominationResult::Nominated);
        assert_eq!(
            NominationResult::from_stored(Some("pending")),
            NominationResult::Nominated
        );
        assert_eq!(
            NominationResult::from_stored(Some("winner")),
            NominationResult::Winner
        );
    }

    #[test]
    fn role_follows_the_category() {
        assert_eq!(Role::for_category("Best Director"), Some(Role::Director));
        assert_eq!(Role::for_category("Best Supporting Actress"), Some(Role::Actor));
        assert_eq!(Role::for_category("BEST ACTOR"), Some(Role::Actor));
        assert_eq!(Role::for_category("Best Picture"), None);
        assert_eq!(Role::for_category("Best Cinematography"), None);
    }

    #[test]
    fn serializes_with_store_capitalisation() {
        let json = serde_json::to_string(&NominationResult::Winner).unwrap();
        assert_eq!(json, "\"Winner\"");
    }
}

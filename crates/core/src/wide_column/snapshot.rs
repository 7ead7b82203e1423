//! Current state of the rows a mutation will touch.
//!
//! Rows whose key is about to change must be re-inserted with every column
//! they held, so the adapter reads them first and hands them to the planner.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::nomination::NominationResult;

use super::key::MovieKey;

/// Value of the `nomination_entry` user-defined type.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NominationEntryCell {
    pub category: Option<String>,
    pub year: Option<i32>,
    pub result: Option<String>,
    pub movie: Option<String>,
}

/// `movies_by_category`.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRow {
    pub movie: String,
    pub year: i32,
    pub genre: Option<String>,
    pub synopsis: Option<String>,
    pub nominations: Vec<String>,
}

/// `awards_by_movie`.
#[derive(Debug, Clone, PartialEq)]
pub struct AwardsRow {
    pub awards_won: i32,
    pub movie: String,
    pub year: i32,
    pub synopsis: Option<String>,
    pub categories: Vec<String>,
}

/// `movies_by_nominations_count`.
#[derive(Debug, Clone, PartialEq)]
pub struct NominationsCountRow {
    pub nominations_count: i32,
    pub movie_name: String,
    pub year: i32,
    pub genre: Option<String>,
    pub synopsis: Option<String>,
    pub awards_won: i32,
}

/// `movies_by_votes_category`.
#[derive(Debug, Clone, PartialEq)]
pub struct VotesRow {
    pub category: String,
    pub movie_name: String,
    pub votes: i32,
    pub synopsis: Option<String>,
}

/// `nominations_by_movie`.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieNominationRow {
    pub category: String,
    pub result: NominationResult,
}

/// Every row keyed on one movie.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieSnapshot {
    pub category: CategoryRow,
    pub awards: Option<AwardsRow>,
    pub nominations: Option<NominationsCountRow>,
    pub votes: Vec<VotesRow>,
    pub entries: Vec<MovieNominationRow>,
}

impl MovieSnapshot {
    /// Snapshot of a movie that only exists in `movies_by_category`.
    pub fn bare(category: CategoryRow) -> Self {
        Self {
            category,
            awards: None,
            nominations: None,
            votes: Vec::new(),
            entries: Vec::new(),
        }
    }

    pub fn key(&self) -> MovieKey {
        MovieKey::new(self.category.movie.clone(), self.category.year)
    }

    pub fn entry(&self, category: &str) -> Option<&MovieNominationRow> {
        self.entries.iter().find(|e| e.category == category)
    }
}

/// `actors_awards`.
#[derive(Debug, Clone, PartialEq)]
pub struct ActorStandingRow {
    pub has_won_award: bool,
    pub nominations: i32,
    pub last_name: String,
    pub first_name: String,
    pub nationality: Option<String>,
    pub categories: Vec<String>,
}

/// Rows keyed on one professional.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfessionalSnapshot {
    pub actor_name: String,
    pub awards_won: i32,
    pub birthdate: Option<NaiveDate>,
    pub nationality: Option<String>,
    pub nominations: Vec<NominationEntryCell>,
    pub standing: Option<ActorStandingRow>,
}

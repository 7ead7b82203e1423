//! Rows of the wide-column access-pattern tables.
//!
//! Field names match column names; rows are decoded by name.

use chrono::NaiveDate;
use oscars_core::nomination::NominationResult;
use oscars_core::wide_column::{
    ActorStandingRow, AwardsRow, CategoryRow, MovieNominationRow, NominationEntryCell,
    NominationsCountRow, VotesRow,
};
use scylla::{DeserializeRow, DeserializeValue};
use serde::Serialize;

/// `nomination_entry` user-defined type.
#[derive(Debug, Clone, PartialEq, Default, Serialize, DeserializeValue)]
pub struct NominationEntry {
    pub category: Option<String>,
    pub year: Option<i32>,
    pub result: Option<String>,
    pub movie: Option<String>,
}

impl From<NominationEntry> for NominationEntryCell {
    fn from(e: NominationEntry) -> Self {
        NominationEntryCell {
            category: e.category,
            year: e.year,
            result: e.result,
            movie: e.movie,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, DeserializeRow)]
pub struct MovieByCategory {
    pub movie: String,
    pub year: i32,
    pub genre: Option<String>,
    pub synopsis: Option<String>,
    pub nominations: Option<Vec<String>>,
}

impl From<MovieByCategory> for CategoryRow {
    fn from(r: MovieByCategory) -> Self {
        CategoryRow {
            movie: r.movie,
            year: r.year,
            genre: r.genre,
            synopsis: r.synopsis,
            nominations: r.nominations.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, DeserializeRow)]
pub struct AwardsByMovie {
    pub awards_won: i32,
    pub movie: String,
    pub year: i32,
    pub synopsis: Option<String>,
    pub category: Option<Vec<String>>,
}

impl From<AwardsByMovie> for AwardsRow {
    fn from(r: AwardsByMovie) -> Self {
        AwardsRow {
            awards_won: r.awards_won,
            movie: r.movie,
            year: r.year,
            synopsis: r.synopsis,
            categories: r.category.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, DeserializeRow)]
pub struct MovieByNominationsCount {
    pub nominations_count: i32,
    pub movie_name: String,
    pub year: i32,
    pub genre: Option<String>,
    pub synopsis: Option<String>,
    pub awards_won: Option<i32>,
}

impl From<MovieByNominationsCount> for NominationsCountRow {
    fn from(r: MovieByNominationsCount) -> Self {
        NominationsCountRow {
            nominations_count: r.nominations_count,
            movie_name: r.movie_name,
            year: r.year,
            genre: r.genre,
            synopsis: r.synopsis,
            awards_won: r.awards_won.unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, DeserializeRow)]
pub struct MovieByVotes {
    pub category: String,
    pub movie_name: String,
    pub votes: Option<i32>,
    pub synopsis: Option<String>,
}

impl From<MovieByVotes> for VotesRow {
    fn from(r: MovieByVotes) -> Self {
        VotesRow {
            category: r.category,
            movie_name: r.movie_name,
            votes: r.votes.unwrap_or(0),
            synopsis: r.synopsis,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, DeserializeRow)]
pub struct NominationByMovie {
    pub movie_name: String,
    pub year: i32,
    pub category: String,
    pub result: Option<String>,
}

impl From<NominationByMovie> for MovieNominationRow {
    fn from(r: NominationByMovie) -> Self {
        MovieNominationRow {
            category: r.category,
            result: NominationResult::from_stored(r.result.as_deref()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, DeserializeRow)]
pub struct AwardsByActor {
    pub awards_won: i32,
    pub actor_name: String,
    pub birthdate: Option<NaiveDate>,
    pub nationality: Option<String>,
    pub nominations: Option<Vec<NominationEntry>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, DeserializeRow)]
pub struct ActorAwards {
    pub has_won_award: bool,
    pub nominations: i32,
    pub last_name: String,
    pub first_name: String,
    pub nationality: Option<String>,
    pub nominations_categories: Option<Vec<String>>,
}

impl From<ActorAwards> for ActorStandingRow {
    fn from(r: ActorAwards) -> Self {
        ActorStandingRow {
            has_won_award: r.has_won_award,
            nominations: r.nominations,
            last_name: r.last_name,
            first_name: r.first_name,
            nationality: r.nationality,
            categories: r.nominations_categories.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, DeserializeRow)]
pub struct NominationsByDirector {
    pub director_name: String,
    pub nominations: Option<Vec<NominationEntry>>,
    pub nominations_count: Option<i32>,
}

/// The two rows answering the vote question.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VotesByCategory {
    pub most_voted: MovieByVotes,
    pub least_voted: MovieByVotes,
}

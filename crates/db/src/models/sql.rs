//! Rows produced by the relational analytical queries.

use chrono::NaiveDate;
use oscars_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// One element of a `json_agg` nomination list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SqlNomination {
    pub category: Option<String>,
    pub year: Option<i32>,
    pub result: Option<String>,
    pub movie: Option<String>,
}

/// A movie with its aggregated award counters.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SqlMovieSummary {
    pub id: DbId,
    pub title: String,
    pub year: i32,
    pub genre: String,
    pub synopsis: String,
    pub nominations_count: i64,
    pub awards_won: i64,
    pub nominations: Json<Vec<SqlNomination>>,
}

/// A professional with aggregated award counters.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SqlProfessionalSummary {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub nationality: String,
    pub birth_date: Option<NaiveDate>,
    pub nominations_count: i64,
    pub awards_won: i64,
    pub nominations: Json<Vec<SqlNomination>>,
}

/// Vote total for one movie.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SqlVoteTally {
    pub movie_id: DbId,
    pub title: String,
    pub synopsis: String,
    pub category: Option<String>,
    pub votes: i64,
}

/// The two tallies answering the vote question.
#[derive(Debug, Clone, Serialize)]
pub struct SqlVoteExtremes {
    pub most_voted: SqlVoteTally,
    pub least_voted: SqlVoteTally,
}

/// A professional matched by name, with every nomination.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SqlDirectorNominations {
    pub id: DbId,
    pub director: String,
    pub nominations_count: i64,
    pub nominations: Json<Vec<SqlNomination>>,
}

/// A movie row as listed by the admin screens.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SqlMovie {
    pub id: DbId,
    pub title: String,
    pub year: i32,
    pub genre: String,
    pub synopsis: String,
    pub awards_won: i64,
    pub nominations_count: i64,
    pub votes: i64,
    pub categories: Vec<String>,
}

/// A professional row as listed by the admin screens.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SqlProfessional {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub nationality: String,
    pub birth_date: Option<NaiveDate>,
    pub awards_won: i64,
    pub nominations_count: i64,
}

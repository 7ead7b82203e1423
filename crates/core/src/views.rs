//! Canonical display shapes rendered by the panels.
//!
//! Each backend answers a question with its own row layout. The store crate
//! maps every layout into one of the shapes below through [`Normalize`], so a
//! panel compares like with like. Fields a backend cannot supply are filled
//! with an empty string, an empty list or `null`, never omitted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::nomination::NominationResult;

/// Request-scoped inputs to normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeContext {
    /// Stands in for the vote date, which no backend records.
    pub as_of: NaiveDate,
}

impl NormalizeContext {
    pub fn new(as_of: NaiveDate) -> Self {
        Self { as_of }
    }

    /// Context dated today (UTC).
    pub fn today() -> Self {
        Self::new(chrono::Utc::now().date_naive())
    }
}

/// Maps a backend-specific row into its canonical display shape.
pub trait Normalize {
    type View: Serialize;

    fn normalize(&self, ctx: &NormalizeContext) -> Self::View;
}

impl<T: Normalize> Normalize for Vec<T> {
    type View = Vec<T::View>;

    fn normalize(&self, ctx: &NormalizeContext) -> Self::View {
        self.iter().map(|row| row.normalize(ctx)).collect()
    }
}

/// One nomination line inside a card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NominationView {
    pub category: String,
    pub year: Option<i32>,
    pub result: NominationResult,
    pub movie: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieCard {
    pub id: String,
    pub title: String,
    pub year: Option<i32>,
    pub genre: String,
    pub synopsis: String,
    pub awards_won: Option<i64>,
    pub nominations_count: Option<i64>,
    pub nominations: Vec<NominationView>,
    pub winning_categories: Vec<String>,
}

impl MovieCard {
    /// Card with only identity and title filled in.
    pub fn titled(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            year: None,
            genre: String::new(),
            synopsis: String::new(),
            awards_won: None,
            nominations_count: None,
            nominations: Vec::new(),
            winning_categories: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfessionalCard {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub nationality: String,
    pub date_of_birth: Option<NaiveDate>,
    pub awards_won: i64,
    pub nominations_count: i64,
    pub nominations: Vec<NominationView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectorCard {
    pub id: String,
    pub director: String,
    pub nominations_count: i64,
    pub nominations: Vec<NominationView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VotedMovie {
    pub title: String,
    pub votes: i64,
    pub category: String,
    pub synopsis: String,
    pub vote_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteExtremes {
    pub most_voted: VotedMovie,
    pub least_voted: VotedMovie,
}

/// Categories of the winning entries, in input order, without duplicates.
pub fn winning_categories(nominations: &[NominationView]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for n in nominations.iter().filter(|n| n.result.is_winner()) {
        if !out.contains(&n.category) {
            out.push(n.category.clone());
        }
    }
    out
}

/// Count of winning entries.
pub fn count_wins(nominations: &[NominationView]) -> i64 {
    nominations.iter().filter(|n| n.result.is_winner()).count() as i64
}

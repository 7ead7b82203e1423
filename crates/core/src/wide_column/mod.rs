//! Wide-column mutation planner.
//!
//! The wide-column store keeps one denormalized table per access pattern, so
//! a single logical change (rename a movie, record a win) touches several
//! tables. Columns that are part of a primary key cannot be updated in place:
//! the row has to be deleted and re-inserted under the new key, carrying the
//! denormalized values along. This module turns a logical change plus a
//! snapshot of the current rows into an ordered list of [`Statement`]s. It
//! performs no I/O; the store adapter reads the snapshot, calls a `plan_*`
//! function and runs the result as one logged batch.

pub mod key;
pub mod plan;
pub mod snapshot;
pub mod statement;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub use key::{MovieKey, NominationKey};
pub use plan::{
    classify_professional_update, plan_movie_delete, plan_movie_insert, plan_movie_update,
    plan_nomination_delete, plan_nomination_insert, plan_nomination_result_change,
    plan_professional_delete, plan_professional_insert, plan_professional_update,
    ProfessionalPlan,
};
pub use snapshot::{
    ActorStandingRow, AwardsRow, CategoryRow, MovieNominationRow, MovieSnapshot,
    NominationEntryCell, NominationsCountRow, ProfessionalSnapshot, VotesRow,
};
pub use statement::{Assignment, CellValue, Statement};

// ---------------------------------------------------------------------------
// Partition buckets
// ---------------------------------------------------------------------------

/// Single partition of `awards_by_movie`.
pub const AWARDS_BUCKET: &str = "11-20";

/// Single partition of `movies_by_nominations_count`.
pub const NOMINATIONS_BUCKET: &str = "nominations";

/// Single partition of `awards_by_actor`.
pub const ACTORS_BUCKET: &str = "21-30";

/// Partition of `movies_by_votes_category` holding the most voted movie.
pub const MOST_VOTES: &str = "most_votes";

/// Partition of `movies_by_votes_category` holding the least voted movie.
pub const LEAST_VOTES: &str = "least_votes";

// ---------------------------------------------------------------------------
// Use case discriminator
// ---------------------------------------------------------------------------

/// Selects which secondary access-pattern table a movie mutation touches in
/// addition to `movies_by_category`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UseCase {
    #[default]
    Category,
    Awards,
    Nominations,
    Votes,
}

impl UseCase {
    pub const ALL: [UseCase; 4] = [
        UseCase::Category,
        UseCase::Awards,
        UseCase::Nominations,
        UseCase::Votes,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            UseCase::Category => "category",
            UseCase::Awards => "awards",
            UseCase::Nominations => "nominations",
            UseCase::Votes => "votes",
        }
    }

    /// The table this use case reads from when listing movies.
    pub fn listing_table(self) -> Table {
        match self {
            UseCase::Category => Table::MoviesByCategory,
            UseCase::Awards => Table::AwardsByMovie,
            UseCase::Nominations => Table::MoviesByNominationsCount,
            UseCase::Votes => Table::MoviesByVotesCategory,
        }
    }
}

impl fmt::Display for UseCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UseCase {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UseCase::ALL
            .into_iter()
            .find(|u| u.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid use case '{s}'. Must be one of: category, awards, nominations, votes"
                ))
            })
    }
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    MoviesByCategory,
    AwardsByMovie,
    MoviesByNominationsCount,
    MoviesByVotesCategory,
    NominationsByMovie,
    AwardsByActor,
    ActorsAwards,
    NominationsByDirector,
}

impl Table {
    pub fn name(self) -> &'static str {
        match self {
            Table::MoviesByCategory => "movies_by_category",
            Table::AwardsByMovie => "awards_by_movie",
            Table::MoviesByNominationsCount => "movies_by_nominations_count",
            Table::MoviesByVotesCategory => "movies_by_votes_category",
            Table::NominationsByMovie => "nominations_by_movie",
            Table::AwardsByActor => "awards_by_actor",
            Table::ActorsAwards => "actors_awards",
            Table::NominationsByDirector => "nominations_by_director",
        }
    }

    /// Primary-key columns, partition key first, in declaration order.
    pub fn key_columns(self) -> &'static [&'static str] {
        match self {
            Table::MoviesByCategory => &["movie", "year"],
            Table::AwardsByMovie => &["partition_key", "awards_won", "movie", "year"],
            Table::MoviesByNominationsCount => {
                &["partition_key", "nominations_count", "movie_name", "year"]
            }
            Table::MoviesByVotesCategory => &["category", "movie_name"],
            Table::NominationsByMovie => &["movie_name", "year", "category"],
            Table::AwardsByActor => &["partition_key", "awards_won", "actor_name"],
            Table::ActorsAwards => &["has_won_award", "nominations", "last_name", "first_name"],
            Table::NominationsByDirector => &["director_name"],
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

//! Backend-tagged raw answers, one enum per analytical question.
//!
//! Serialized with a `kind` discriminator (`mongo`, `cassandra`, `sql`) so a
//! client can tell which layout it received.

use oscars_core::backend::Backend;
use serde::Serialize;

use super::cassandra::{
    ActorAwards, AwardsByActor, AwardsByMovie, MovieByCategory, MovieByNominationsCount,
    NominationsByDirector, VotesByCategory,
};
use super::mongo::{MovieDocument, ProfessionalDocument, VoteTally};
use super::sql::{SqlDirectorNominations, SqlMovieSummary, SqlProfessionalSummary, SqlVoteExtremes};

/// "Movies nominated", most recent first.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NominatedMovieRow {
    Mongo(MovieDocument),
    Cassandra(MovieByCategory),
    Sql(SqlMovieSummary),
}

/// "Movies nominated and awarded".
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AwardedMovieRow {
    Mongo(MovieDocument),
    Cassandra(MovieByNominationsCount),
    Sql(SqlMovieSummary),
}

/// "Most awarded movies".
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MostAwardedMovieRow {
    Mongo(MovieDocument),
    Cassandra(AwardsByMovie),
    Sql(SqlMovieSummary),
}

/// "Nominated, never won".
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NeverWonRow {
    Mongo(ProfessionalDocument),
    Cassandra(ActorAwards),
    Sql(SqlProfessionalSummary),
}

/// "Most awarded actor".
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MostAwardedActorRow {
    Mongo(ProfessionalDocument),
    Cassandra(AwardsByActor),
    Sql(SqlProfessionalSummary),
}

/// Tallies of the "most and least voted" question.
#[derive(Debug, Clone, Serialize)]
pub struct MongoVoteExtremes {
    pub most_voted: VoteTally,
    pub least_voted: VoteTally,
}

/// "Most and least voted movie".
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum VoteExtremesRow {
    Mongo(MongoVoteExtremes),
    Cassandra(VotesByCategory),
    Sql(SqlVoteExtremes),
}

/// "Director nominations".
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DirectorRow {
    Mongo(ProfessionalDocument),
    Cassandra(NominationsByDirector),
    Sql(SqlDirectorNominations),
}

macro_rules! impl_backend {
    ($($row:ty),* $(,)?) => {
        $(
            impl $row {
                /// Backend that produced this row.
                pub fn backend(&self) -> Backend {
                    match self {
                        Self::Mongo(_) => Backend::Mongo,
                        Self::Cassandra(_) => Backend::Cassandra,
                        Self::Sql(_) => Backend::Sql,
                    }
                }
            }
        )*
    };
}

impl_backend!(
    NominatedMovieRow,
    AwardedMovieRow,
    MostAwardedMovieRow,
    NeverWonRow,
    MostAwardedActorRow,
    VoteExtremesRow,
    DirectorRow,
);

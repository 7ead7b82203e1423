//! Raw row models, one module per backend, plus the tagged answer enums.

pub mod cassandra;
pub mod mongo;
pub mod rows;
pub mod sql;

pub use rows::{
    AwardedMovieRow, DirectorRow, MongoVoteExtremes, MostAwardedActorRow, MostAwardedMovieRow,
    NeverWonRow, NominatedMovieRow, VoteExtremesRow,
};

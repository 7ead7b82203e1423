//! Analytical queries against the access-pattern tables.
//!
//! Each question reads the table shaped for it. Where the clustering order
//! sorts the answer, CQL does the work; the vote partitions cluster by name,
//! so their extremes are picked in memory.

use oscars_core::analytics::{
    most_recent_nominated, vote_extremes, AWARDED_MOVIES_MIN_AWARDS,
    AWARDED_MOVIES_NOMINATIONS_ABOVE, MOST_AWARDED_MOVIES_LIMIT, NEVER_WON_NOMINATIONS_ABOVE,
};
use oscars_core::search::NameQuery;
use oscars_core::wide_column::{
    Table, ACTORS_BUCKET, AWARDS_BUCKET, LEAST_VOTES, MOST_VOTES, NOMINATIONS_BUCKET,
};

use crate::error::{StoreError, StoreResult};
use crate::models::cassandra::{
    ActorAwards, AwardsByActor, AwardsByMovie, MovieByCategory, MovieByNominationsCount,
    MovieByVotes, NominationsByDirector, VotesByCategory,
};

use super::session::CqlSession;

pub(crate) const CATEGORY_COLUMNS: &str = "movie, year, genre, synopsis, nominations";
pub(crate) const AWARDS_COLUMNS: &str = "awards_won, movie, year, synopsis, category";
pub(crate) const COUNT_COLUMNS: &str =
    "nominations_count, movie_name, year, genre, synopsis, awards_won";
pub(crate) const VOTES_COLUMNS: &str = "category, movie_name, votes, synopsis";
pub(crate) const ACTOR_COLUMNS: &str = "awards_won, actor_name, birthdate, nationality, nominations";
pub(crate) const STANDING_COLUMNS: &str =
    "has_won_award, nominations, last_name, first_name, nationality, nominations_categories";
const DIRECTOR_COLUMNS: &str = "director_name, nominations, nominations_count";

pub struct CassandraAnalytics;

impl CassandraAnalytics {
    pub async fn movies_nominated(cql: &CqlSession) -> StoreResult<Vec<MovieByCategory>> {
        let rows: Vec<MovieByCategory> = cql
            .fetch(
                format!(
                    "SELECT {CATEGORY_COLUMNS} FROM {}",
                    cql.table(Table::MoviesByCategory.name())
                ),
                (),
            )
            .await?;
        Ok(most_recent_nominated(
            rows,
            |r| r.year,
            |r| r.movie.as_str(),
            |r| r.nominations.as_ref().map_or(0, Vec::len),
        ))
    }

    pub async fn movies_nominated_and_awarded(
        cql: &CqlSession,
    ) -> StoreResult<Vec<MovieByNominationsCount>> {
        let rows: Vec<MovieByNominationsCount> = cql
            .fetch(
                format!(
                    "SELECT {COUNT_COLUMNS} FROM {} WHERE partition_key = ? AND nominations_count > ?",
                    cql.table(Table::MoviesByNominationsCount.name())
                ),
                (NOMINATIONS_BUCKET, AWARDED_MOVIES_NOMINATIONS_ABOVE as i32),
            )
            .await?;
        Ok(keep_awarded(rows))
    }

    pub async fn most_awarded_movies(cql: &CqlSession) -> StoreResult<Vec<AwardsByMovie>> {
        cql.fetch(
            format!(
                "SELECT {AWARDS_COLUMNS} FROM {} WHERE partition_key = ? LIMIT {MOST_AWARDED_MOVIES_LIMIT}",
                cql.table(Table::AwardsByMovie.name())
            ),
            (AWARDS_BUCKET,),
        )
        .await
    }

    pub async fn nominated_never_won(cql: &CqlSession) -> StoreResult<Vec<ActorAwards>> {
        cql.fetch(
            format!(
                "SELECT {STANDING_COLUMNS} FROM {} WHERE has_won_award = ? AND nominations > ?",
                cql.table(Table::ActorsAwards.name())
            ),
            (false, NEVER_WON_NOMINATIONS_ABOVE as i32),
        )
        .await
    }

    pub async fn most_awarded_actor(cql: &CqlSession) -> StoreResult<AwardsByActor> {
        let rows: Vec<AwardsByActor> = cql
            .fetch(
                format!(
                    "SELECT {ACTOR_COLUMNS} FROM {} WHERE partition_key = ? LIMIT 1",
                    cql.table(Table::AwardsByActor.name())
                ),
                (ACTORS_BUCKET,),
            )
            .await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::not_found("Professional", "most awarded"))
    }

    /// Rows cluster by movie name, not by votes, so the whole partition is read.
    async fn vote_partition(cql: &CqlSession, partition: &str) -> StoreResult<Vec<MovieByVotes>> {
        cql.fetch(
            format!(
                "SELECT {VOTES_COLUMNS} FROM {} WHERE category = ?",
                cql.table(Table::MoviesByVotesCategory.name())
            ),
            (partition,),
        )
        .await
    }

    pub async fn vote_extremes(cql: &CqlSession) -> StoreResult<VotesByCategory> {
        let most = Self::vote_partition(cql, MOST_VOTES).await?;
        let least = Self::vote_partition(cql, LEAST_VOTES).await?;
        pick_vote_extremes(&most, &least).ok_or_else(|| StoreError::not_found("Vote", "any movie"))
    }

    /// The table is keyed on the full name only, so matching happens here.
    pub async fn director_nominations(
        cql: &CqlSession,
        query: &NameQuery,
    ) -> StoreResult<Vec<NominationsByDirector>> {
        let rows: Vec<NominationsByDirector> = cql
            .fetch(
                format!(
                    "SELECT {DIRECTOR_COLUMNS} FROM {}",
                    cql.table(Table::NominationsByDirector.name())
                ),
                (),
            )
            .await?;
        let mut matched: Vec<NominationsByDirector> = rows
            .into_iter()
            .filter(|r| query.matches_full_name(&r.director_name))
            .collect();
        matched.sort_by(|a, b| a.director_name.cmp(&b.director_name));
        Ok(matched)
    }
}

/// The nomination cut-off runs in CQL; the award cut-off has no index.
pub(crate) fn keep_awarded(rows: Vec<MovieByNominationsCount>) -> Vec<MovieByNominationsCount> {
    rows.into_iter()
        .filter(|r| i64::from(r.awards_won.unwrap_or(0)) >= AWARDED_MOVIES_MIN_AWARDS)
        .collect()
}

/// Highest tally of the `most_votes` partition and lowest of `least_votes`.
/// A row without a tally counts as zero votes.
pub(crate) fn pick_vote_extremes(
    most: &[MovieByVotes],
    least: &[MovieByVotes],
) -> Option<VotesByCategory> {
    let tally = |r: &MovieByVotes| i64::from(r.votes.unwrap_or(0));
    let (most_voted, _) = vote_extremes(most, tally)?;
    let (_, least_voted) = vote_extremes(least, tally)?;
    Some(VotesByCategory {
        most_voted,
        least_voted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voted(partition: &str, movie: &str, votes: Option<i32>) -> MovieByVotes {
        MovieByVotes {
            category: partition.to_string(),
            movie_name: movie.to_string(),
            votes,
            synopsis: None,
        }
    }

    fn counted(movie: &str, nominations: i32, awards_won: Option<i32>) -> MovieByNominationsCount {
        MovieByNominationsCount {
            nominations_count: nominations,
            movie_name: movie.to_string(),
            year: 2000,
            genre: None,
            synopsis: None,
            awards_won,
        }
    }

    #[test]
    fn most_voted_ignores_alphabetical_partition_order() {
        let most = vec![
            voted(MOST_VOTES, "Aardvark", Some(0)),
            voted(MOST_VOTES, "Titanic", Some(900)),
        ];
        let least = vec![
            voted(LEAST_VOTES, "Amelie", Some(40)),
            voted(LEAST_VOTES, "Zodiac", Some(3)),
        ];
        let picked = pick_vote_extremes(&most, &least).unwrap();
        assert_eq!(picked.most_voted.movie_name, "Titanic");
        assert_eq!(picked.least_voted.movie_name, "Zodiac");
    }

    #[test]
    fn missing_tally_counts_as_zero() {
        let most = vec![voted(MOST_VOTES, "Blank", None), voted(MOST_VOTES, "One", Some(1))];
        let least = vec![voted(LEAST_VOTES, "Blank", None), voted(LEAST_VOTES, "One", Some(1))];
        let picked = pick_vote_extremes(&most, &least).unwrap();
        assert_eq!(picked.most_voted.movie_name, "One");
        assert_eq!(picked.least_voted.movie_name, "Blank");
    }

    #[test]
    fn an_empty_partition_has_no_extremes() {
        let most = vec![voted(MOST_VOTES, "Titanic", Some(900))];
        assert!(pick_vote_extremes(&most, &[]).is_none());
        assert!(pick_vote_extremes(&[], &most).is_none());
    }

    #[test]
    fn awarded_filter_keeps_three_or_more_wins() {
        let rows = vec![
            counted("Three", 5, Some(3)),
            counted("Two", 9, Some(2)),
            counted("Unknown", 7, None),
            counted("Eleven", 14, Some(11)),
        ];
        let kept: Vec<_> = keep_awarded(rows).into_iter().map(|r| r.movie_name).collect();
        assert_eq!(kept, vec!["Three", "Eleven"]);
    }
}

//! Reads the current rows a mutation is planned against, plus the admin
//! listings.
//!
//! Bucket tables cluster on counters, so a movie's row there can only be
//! found by scanning its bucket.

use oscars_core::catalog::{MovieRecord, ProfessionalRecord};
use oscars_core::search::split_full_name;
use oscars_core::wide_column::{
    ActorStandingRow, MovieKey, MovieSnapshot, ProfessionalSnapshot, Table, UseCase,
    ACTORS_BUCKET, AWARDS_BUCKET, LEAST_VOTES, MOST_VOTES, NOMINATIONS_BUCKET,
};

use crate::error::StoreResult;
use crate::models::cassandra::{
    ActorAwards, AwardsByActor, AwardsByMovie, MovieByCategory, MovieByNominationsCount,
    MovieByVotes, NominationByMovie,
};

use super::analytics::{
    ACTOR_COLUMNS, AWARDS_COLUMNS, CATEGORY_COLUMNS, COUNT_COLUMNS, STANDING_COLUMNS,
    VOTES_COLUMNS,
};
use super::session::CqlSession;

pub struct SnapshotRepo;

impl SnapshotRepo {
    async fn category_row(cql: &CqlSession, key: &MovieKey) -> StoreResult<Option<MovieByCategory>> {
        let rows: Vec<MovieByCategory> = cql
            .fetch(
                format!(
                    "SELECT {CATEGORY_COLUMNS} FROM {} WHERE movie = ? AND year = ?",
                    cql.table(Table::MoviesByCategory.name())
                ),
                (key.title.as_str(), key.year),
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    /// Every row keyed on `key`, or `None` when the movie is not in
    /// `movies_by_category`.
    pub async fn movie(cql: &CqlSession, key: &MovieKey) -> StoreResult<Option<MovieSnapshot>> {
        let Some(category) = Self::category_row(cql, key).await? else {
            return Ok(None);
        };
        let mut snapshot = MovieSnapshot::bare(category.into());

        let awards: Vec<AwardsByMovie> = cql
            .fetch(
                format!(
                    "SELECT {AWARDS_COLUMNS} FROM {} WHERE partition_key = ?",
                    cql.table(Table::AwardsByMovie.name())
                ),
                (AWARDS_BUCKET,),
            )
            .await?;
        snapshot.awards = awards
            .into_iter()
            .find(|r| r.movie == key.title && r.year == key.year)
            .map(Into::into);

        let counts: Vec<MovieByNominationsCount> = cql
            .fetch(
                format!(
                    "SELECT {COUNT_COLUMNS} FROM {} WHERE partition_key = ?",
                    cql.table(Table::MoviesByNominationsCount.name())
                ),
                (NOMINATIONS_BUCKET,),
            )
            .await?;
        snapshot.nominations = counts
            .into_iter()
            .find(|r| r.movie_name == key.title && r.year == key.year)
            .map(Into::into);

        for partition in [MOST_VOTES, LEAST_VOTES] {
            let votes: Vec<MovieByVotes> = cql
                .fetch(
                    format!(
                        "SELECT {VOTES_COLUMNS} FROM {} WHERE category = ? AND movie_name = ?",
                        cql.table(Table::MoviesByVotesCategory.name())
                    ),
                    (partition, key.title.as_str()),
                )
                .await?;
            snapshot.votes.extend(votes.into_iter().map(Into::into));
        }

        let entries: Vec<NominationByMovie> = cql
            .fetch(
                format!(
                    "SELECT movie_name, year, category, result FROM {} WHERE movie_name = ? AND year = ?",
                    cql.table(Table::NominationsByMovie.name())
                ),
                (key.title.as_str(), key.year),
            )
            .await?;
        snapshot.entries = entries.into_iter().map(Into::into).collect();

        Ok(Some(snapshot))
    }

    async fn standing(
        cql: &CqlSession,
        first_name: &str,
        last_name: &str,
    ) -> StoreResult<Option<ActorStandingRow>> {
        for has_won_award in [false, true] {
            let rows: Vec<ActorAwards> = cql
                .fetch(
                    format!(
                        "SELECT {STANDING_COLUMNS} FROM {} WHERE has_won_award = ?",
                        cql.table(Table::ActorsAwards.name())
                    ),
                    (has_won_award,),
                )
                .await?;
            if let Some(row) = rows
                .into_iter()
                .find(|r| r.first_name == first_name && r.last_name == last_name)
            {
                return Ok(Some(row.into()));
            }
        }
        Ok(None)
    }

    /// The `awards_by_actor` row named `actor_name` and its standing row.
    pub async fn professional(
        cql: &CqlSession,
        actor_name: &str,
    ) -> StoreResult<Option<ProfessionalSnapshot>> {
        let Some(actor) = Self::actors(cql)
            .await?
            .into_iter()
            .find(|a| a.actor_name == actor_name)
        else {
            return Ok(None);
        };
        let (first, last) = split_full_name(actor_name);
        let standing = Self::standing(cql, first, last).await?;
        Ok(Some(ProfessionalSnapshot {
            actor_name: actor.actor_name,
            awards_won: actor.awards_won,
            birthdate: actor.birthdate,
            nationality: actor.nationality,
            nominations: actor
                .nominations
                .unwrap_or_default()
                .into_iter()
                .map(Into::into)
                .collect(),
            standing,
        }))
    }

    async fn actors(cql: &CqlSession) -> StoreResult<Vec<AwardsByActor>> {
        cql.fetch(
            format!(
                "SELECT {ACTOR_COLUMNS} FROM {} WHERE partition_key = ?",
                cql.table(Table::AwardsByActor.name())
            ),
            (ACTORS_BUCKET,),
        )
        .await
    }

    // -----------------------------------------------------------------------
    // Listings
    // -----------------------------------------------------------------------

    /// Movies as stored in the table `use_case` reads from.
    pub async fn list_movies(cql: &CqlSession, use_case: UseCase) -> StoreResult<Vec<MovieRecord>> {
        let table = cql.table(use_case.listing_table().name());
        let records = match use_case {
            UseCase::Category => {
                let rows: Vec<MovieByCategory> = cql
                    .fetch(format!("SELECT {CATEGORY_COLUMNS} FROM {table}"), ())
                    .await?;
                rows.into_iter().map(category_record).collect()
            }
            UseCase::Awards => {
                let rows: Vec<AwardsByMovie> = cql
                    .fetch(
                        format!("SELECT {AWARDS_COLUMNS} FROM {table} WHERE partition_key = ?"),
                        (AWARDS_BUCKET,),
                    )
                    .await?;
                rows.into_iter().map(awards_record).collect()
            }
            UseCase::Nominations => {
                let rows: Vec<MovieByNominationsCount> = cql
                    .fetch(
                        format!("SELECT {COUNT_COLUMNS} FROM {table} WHERE partition_key = ?"),
                        (NOMINATIONS_BUCKET,),
                    )
                    .await?;
                rows.into_iter().map(count_record).collect()
            }
            UseCase::Votes => {
                let mut records = Vec::new();
                for partition in [MOST_VOTES, LEAST_VOTES] {
                    let rows: Vec<MovieByVotes> = cql
                        .fetch(
                            format!("SELECT {VOTES_COLUMNS} FROM {table} WHERE category = ?"),
                            (partition,),
                        )
                        .await?;
                    for row in rows {
                        let year = Self::year_of(cql, &row.movie_name).await?;
                        records.push(votes_record(row, year));
                    }
                }
                records
            }
        };
        Ok(records)
    }

    /// Release year of the first `movies_by_category` row titled `title`.
    /// Vote rows do not store it.
    async fn year_of(cql: &CqlSession, title: &str) -> StoreResult<Option<i32>> {
        let rows: Vec<(String, i32)> = cql
            .fetch(
                format!(
                    "SELECT movie, year FROM {} WHERE movie = ? ALLOW FILTERING",
                    cql.table(Table::MoviesByCategory.name())
                ),
                (title,),
            )
            .await?;
        Ok(rows.into_iter().map(|(_, year)| year).min())
    }

    pub async fn list_professionals(cql: &CqlSession) -> StoreResult<Vec<ProfessionalRecord>> {
        let rows = Self::actors(cql).await?;
        Ok(rows.into_iter().map(professional_record).collect())
    }
}

fn category_record(r: MovieByCategory) -> MovieRecord {
    let categories = r.nominations.unwrap_or_default();
    MovieRecord {
        id: MovieKey::new(r.movie.clone(), r.year).to_string(),
        title: r.movie,
        year: Some(r.year),
        genre: r.genre.unwrap_or_default(),
        synopsis: r.synopsis.unwrap_or_default(),
        awards_won: 0,
        nominations_count: categories.len() as i64,
        votes: None,
        categories,
    }
}

fn awards_record(r: AwardsByMovie) -> MovieRecord {
    MovieRecord {
        id: MovieKey::new(r.movie.clone(), r.year).to_string(),
        title: r.movie,
        year: Some(r.year),
        genre: String::new(),
        synopsis: r.synopsis.unwrap_or_default(),
        awards_won: i64::from(r.awards_won),
        nominations_count: 0,
        votes: None,
        categories: r.category.unwrap_or_default(),
    }
}

fn count_record(r: MovieByNominationsCount) -> MovieRecord {
    MovieRecord {
        id: MovieKey::new(r.movie_name.clone(), r.year).to_string(),
        title: r.movie_name,
        year: Some(r.year),
        genre: r.genre.unwrap_or_default(),
        synopsis: r.synopsis.unwrap_or_default(),
        awards_won: i64::from(r.awards_won.unwrap_or(0)),
        nominations_count: i64::from(r.nominations_count),
        votes: None,
        categories: Vec::new(),
    }
}

fn votes_record(r: MovieByVotes, year: Option<i32>) -> MovieRecord {
    let id = match year {
        Some(year) => MovieKey::new(r.movie_name.clone(), year).to_string(),
        None => r.movie_name.clone(),
    };
    MovieRecord {
        id,
        title: r.movie_name,
        year,
        genre: String::new(),
        synopsis: r.synopsis.unwrap_or_default(),
        awards_won: 0,
        nominations_count: 0,
        votes: Some(i64::from(r.votes.unwrap_or(0))),
        categories: vec![r.category],
    }
}

fn professional_record(r: AwardsByActor) -> ProfessionalRecord {
    let (first, last) = split_full_name(&r.actor_name);
    let (first_name, last_name) = (first.to_string(), last.to_string());
    ProfessionalRecord {
        id: r.actor_name,
        first_name,
        last_name,
        nationality: r.nationality.unwrap_or_default(),
        date_of_birth: r.birthdate,
        awards_won: i64::from(r.awards_won),
        nominations_count: r.nominations.map_or(0, |n| n.len() as i64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_rows_list_under_their_composite_id() {
        let record = category_record(MovieByCategory {
            movie: "Top_Gun".to_string(),
            year: 1986,
            genre: None,
            synopsis: Some("Jets".to_string()),
            nominations: Some(vec!["Best Sound".to_string()]),
        });
        assert_eq!(record.id, "Top_Gun_1986");
        assert_eq!(record.nominations_count, 1);
        assert_eq!(record.genre, "");
    }

    #[test]
    fn vote_rows_without_a_known_year_fall_back_to_the_title() {
        let row = MovieByVotes {
            category: MOST_VOTES.to_string(),
            movie_name: "Parasite".to_string(),
            votes: Some(812),
            synopsis: None,
        };
        let record = votes_record(row.clone(), None);
        assert_eq!(record.id, "Parasite");
        assert_eq!(record.votes, Some(812));
        assert_eq!(votes_record(row, Some(2019)).id, "Parasite_2019");
    }

    #[test]
    fn professional_names_split_at_the_first_space() {
        let record = professional_record(AwardsByActor {
            awards_won: 3,
            actor_name: "Daniel Day-Lewis".to_string(),
            birthdate: None,
            nationality: None,
            nominations: None,
        });
        assert_eq!(record.first_name, "Daniel");
        assert_eq!(record.last_name, "Day-Lewis");
        assert_eq!(record.nominations_count, 0);
    }
}

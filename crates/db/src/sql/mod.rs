//! Relational adapter (PostgreSQL).
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&PgPool` as the first argument; [`SqlStore`] owns the pool and wires the
//! repositories to the store traits.

pub mod analytics_repo;
pub mod movie_repo;
pub mod nomination_repo;
pub mod professional_repo;

use async_trait::async_trait;
use oscars_core::backend::Backend;
use oscars_core::catalog::{
    validate_movie_changes, validate_movie_input, validate_nomination_input,
    validate_professional_changes, validate_professional_input, MovieChanges, MovieInput,
    MovieRecord, MutationAck, NominationChanges, NominationInput, ProfessionalChanges,
    ProfessionalInput, ProfessionalRecord,
};
use oscars_core::error::CoreError;
use oscars_core::search::NameQuery;
use oscars_core::types::DbId;
use oscars_core::wide_column::UseCase;

pub use analytics_repo::AnalyticsRepo;
pub use movie_repo::MovieRepo;
pub use nomination_repo::{NewNomination, NominationRepo};
pub use professional_repo::ProfessionalRepo;

use crate::error::{StoreError, StoreResult};
use crate::models::sql::{SqlMovie, SqlProfessional, SqlVoteExtremes};
use crate::models::{
    AwardedMovieRow, DirectorRow, MostAwardedActorRow, MostAwardedMovieRow, NeverWonRow,
    NominatedMovieRow, VoteExtremesRow,
};
use crate::store::{AnalyticsStore, CatalogStore};
use crate::DbPool;

/// Relational store backed by a shared connection pool.
#[derive(Clone)]
pub struct SqlStore {
    pool: DbPool,
}

impl SqlStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

/// Parse a relational record id from its path form.
fn parse_id(entity: &'static str, id: &str) -> StoreResult<DbId> {
    id.parse::<DbId>()
        .map_err(|_| CoreError::Validation(format!("Invalid {entity} id '{id}'")).into())
}

impl From<SqlMovie> for MovieRecord {
    fn from(m: SqlMovie) -> Self {
        MovieRecord {
            id: m.id.to_string(),
            title: m.title,
            year: Some(m.year),
            genre: m.genre,
            synopsis: m.synopsis,
            awards_won: m.awards_won,
            nominations_count: m.nominations_count,
            votes: Some(m.votes),
            categories: m.categories,
        }
    }
}

impl From<SqlProfessional> for ProfessionalRecord {
    fn from(p: SqlProfessional) -> Self {
        ProfessionalRecord {
            id: p.id.to_string(),
            first_name: p.first_name,
            last_name: p.last_name,
            nationality: p.nationality,
            date_of_birth: p.birth_date,
            awards_won: p.awards_won,
            nominations_count: p.nominations_count,
        }
    }
}

#[async_trait]
impl AnalyticsStore for SqlStore {
    fn backend(&self) -> Backend {
        Backend::Sql
    }

    async fn ping(&self) -> StoreResult<()> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }

    async fn movies_nominated(&self) -> StoreResult<Vec<NominatedMovieRow>> {
        let rows = AnalyticsRepo::movies_nominated(&self.pool).await?;
        Ok(rows.into_iter().map(NominatedMovieRow::Sql).collect())
    }

    async fn movies_nominated_and_awarded(&self) -> StoreResult<Vec<AwardedMovieRow>> {
        let rows = AnalyticsRepo::movies_nominated_and_awarded(&self.pool).await?;
        Ok(rows.into_iter().map(AwardedMovieRow::Sql).collect())
    }

    async fn most_awarded_movies(&self) -> StoreResult<Vec<MostAwardedMovieRow>> {
        let rows = AnalyticsRepo::most_awarded_movies(&self.pool).await?;
        Ok(rows.into_iter().map(MostAwardedMovieRow::Sql).collect())
    }

    async fn nominated_never_won(&self) -> StoreResult<Vec<NeverWonRow>> {
        let rows = AnalyticsRepo::nominated_never_won(&self.pool).await?;
        Ok(rows.into_iter().map(NeverWonRow::Sql).collect())
    }

    async fn most_awarded_actor(&self) -> StoreResult<MostAwardedActorRow> {
        AnalyticsRepo::most_awarded_actor(&self.pool)
            .await?
            .map(MostAwardedActorRow::Sql)
            .ok_or_else(|| StoreError::not_found("Professional", "most awarded"))
    }

    async fn vote_extremes(&self) -> StoreResult<VoteExtremesRow> {
        let most = AnalyticsRepo::most_voted(&self.pool).await?;
        let least = AnalyticsRepo::least_voted(&self.pool).await?;
        match (most, least) {
            (Some(most_voted), Some(least_voted)) => Ok(VoteExtremesRow::Sql(SqlVoteExtremes {
                most_voted,
                least_voted,
            })),
            _ => Err(StoreError::not_found("Vote", "any movie")),
        }
    }

    async fn director_nominations(&self, query: &NameQuery) -> StoreResult<Vec<DirectorRow>> {
        let rows = AnalyticsRepo::director_nominations(&self.pool, query).await?;
        Ok(rows.into_iter().map(DirectorRow::Sql).collect())
    }
}

#[async_trait]
impl CatalogStore for SqlStore {
    async fn list_movies(&self, _use_case: UseCase) -> StoreResult<Vec<MovieRecord>> {
        let rows = MovieRepo::list(&self.pool).await?;
        Ok(rows.into_iter().map(MovieRecord::from).collect())
    }

    async fn create_movie(&self, input: &MovieInput, _use_case: UseCase) -> StoreResult<MutationAck> {
        validate_movie_input(input)?;
        let id = MovieRepo::create(&self.pool, input).await?;
        tracing::info!(movie_id = id, "Movie created");
        Ok(MutationAck::ok(id.to_string()))
    }

    async fn update_movie(
        &self,
        id: &str,
        changes: &MovieChanges,
        _use_case: UseCase,
    ) -> StoreResult<MutationAck> {
        let movie_id = parse_id("movie", id)?;
        validate_movie_changes(changes)?;
        MovieRepo::update(&self.pool, movie_id, changes)
            .await?
            .ok_or_else(|| StoreError::not_found("Movie", movie_id))?;
        Ok(MutationAck::ok(id))
    }

    async fn delete_movie(&self, id: &str, _use_case: UseCase) -> StoreResult<MutationAck> {
        let movie_id = parse_id("movie", id)?;
        if !MovieRepo::delete(&self.pool, movie_id).await? {
            return Err(StoreError::not_found("Movie", movie_id));
        }
        Ok(MutationAck::ok(id))
    }

    async fn list_professionals(&self) -> StoreResult<Vec<ProfessionalRecord>> {
        let rows = ProfessionalRepo::list(&self.pool).await?;
        Ok(rows.into_iter().map(ProfessionalRecord::from).collect())
    }

    async fn create_professional(&self, input: &ProfessionalInput) -> StoreResult<MutationAck> {
        validate_professional_input(input)?;
        let id = ProfessionalRepo::create(&self.pool, input).await?;
        tracing::info!(professional_id = id, "Professional created");
        Ok(MutationAck::ok(id.to_string()))
    }

    async fn update_professional(
        &self,
        id: &str,
        changes: &ProfessionalChanges,
    ) -> StoreResult<MutationAck> {
        let professional_id = parse_id("professional", id)?;
        validate_professional_changes(changes)?;
        ProfessionalRepo::update(&self.pool, professional_id, changes)
            .await?
            .ok_or_else(|| StoreError::not_found("Professional", professional_id))?;
        Ok(MutationAck::ok(id))
    }

    async fn delete_professional(&self, id: &str) -> StoreResult<MutationAck> {
        let professional_id = parse_id("professional", id)?;
        if !ProfessionalRepo::delete(&self.pool, professional_id).await? {
            return Err(StoreError::not_found("Professional", professional_id));
        }
        Ok(MutationAck::ok(id))
    }

    async fn create_nomination(&self, input: &NominationInput) -> StoreResult<MutationAck> {
        validate_nomination_input(input)?;
        let movie_id = parse_id("movie", &input.movie_id)?;
        if !MovieRepo::exists(&self.pool, movie_id).await? {
            return Err(StoreError::not_found("Movie", movie_id));
        }
        let professional_id = match input.professional_id.as_deref() {
            Some(raw) => {
                let pid = parse_id("professional", raw)?;
                if !ProfessionalRepo::exists(&self.pool, pid).await? {
                    return Err(StoreError::not_found("Professional", pid));
                }
                Some(pid)
            }
            None => None,
        };
        let id = NominationRepo::create(
            &self.pool,
            &NewNomination {
                movie_id,
                professional_id,
                category: &input.category,
                year: input.year,
                result: input.result,
            },
        )
        .await?;
        tracing::info!(nomination_id = id, movie_id, "Nomination created");
        Ok(MutationAck::ok(id.to_string()))
    }

    async fn update_nomination(
        &self,
        id: &str,
        changes: &NominationChanges,
    ) -> StoreResult<MutationAck> {
        let nomination_id = parse_id("nomination", id)?;
        if !NominationRepo::update_result(&self.pool, nomination_id, changes.result).await? {
            return Err(StoreError::not_found("Nomination", nomination_id));
        }
        Ok(MutationAck::ok(id))
    }

    async fn delete_nomination(&self, id: &str) -> StoreResult<MutationAck> {
        let nomination_id = parse_id("nomination", id)?;
        if !NominationRepo::delete(&self.pool, nomination_id).await? {
            return Err(StoreError::not_found("Nomination", nomination_id));
        }
        Ok(MutationAck::ok(id))
    }
}

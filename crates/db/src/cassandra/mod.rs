//! Wide-column adapter (Cassandra / ScyllaDB).
//!
//! Reads go straight to the access-pattern table for the question. Writes
//! load a snapshot of the affected rows, hand it to the planner in
//! `oscars_core::wide_column` and run the planned statements as one logged
//! batch.

pub mod analytics;
pub mod session;
pub mod snapshot_repo;

use std::sync::Arc;

use async_trait::async_trait;
use oscars_core::backend::Backend;
use oscars_core::catalog::{
    join_name, validate_movie_changes, validate_movie_input, validate_nomination_input,
    validate_professional_changes, validate_professional_input, MovieChanges, MovieInput,
    MovieRecord, MutationAck, NominationChanges, NominationInput, ProfessionalChanges,
    ProfessionalInput, ProfessionalRecord,
};
use oscars_core::error::CoreError;
use oscars_core::search::{split_full_name, NameQuery};
use oscars_core::wide_column::{
    plan_movie_delete, plan_movie_insert, plan_movie_update, plan_nomination_delete,
    plan_nomination_insert, plan_nomination_result_change, plan_professional_delete,
    plan_professional_insert, plan_professional_update, MovieKey, MovieSnapshot, NominationKey,
    ProfessionalSnapshot, UseCase,
};

pub use analytics::CassandraAnalytics;
pub use session::CqlSession;
pub use snapshot_repo::SnapshotRepo;

use crate::error::{StoreError, StoreResult};
use crate::models::{
    AwardedMovieRow, DirectorRow, MostAwardedActorRow, MostAwardedMovieRow, NeverWonRow,
    NominatedMovieRow, VoteExtremesRow,
};
use crate::store::{AnalyticsStore, CatalogStore};

/// Wide-column store sharing one session across handlers.
#[derive(Clone)]
pub struct CassandraStore {
    cql: Arc<CqlSession>,
}

impl CassandraStore {
    pub async fn connect(nodes: &[String], keyspace: &str) -> StoreResult<Self> {
        let cql = CqlSession::connect(nodes, keyspace).await?;
        tracing::info!(?nodes, keyspace, "Connected to wide-column store");
        Ok(Self { cql: Arc::new(cql) })
    }

    pub async fn apply_schema(&self, schema: &str) -> StoreResult<()> {
        self.cql.apply_schema(schema).await
    }

    async fn movie_snapshot(&self, key: &MovieKey) -> StoreResult<MovieSnapshot> {
        SnapshotRepo::movie(&self.cql, key)
            .await?
            .ok_or_else(|| StoreError::not_found("Movie", key))
    }

    async fn professional_snapshot(&self, name: &str) -> StoreResult<ProfessionalSnapshot> {
        SnapshotRepo::professional(&self.cql, name)
            .await?
            .ok_or_else(|| StoreError::not_found("Professional", name))
    }
}

#[async_trait]
impl AnalyticsStore for CassandraStore {
    fn backend(&self) -> Backend {
        Backend::Cassandra
    }

    async fn ping(&self) -> StoreResult<()> {
        self.cql.ping().await
    }

    async fn movies_nominated(&self) -> StoreResult<Vec<NominatedMovieRow>> {
        let rows = CassandraAnalytics::movies_nominated(&self.cql).await?;
        Ok(rows.into_iter().map(NominatedMovieRow::Cassandra).collect())
    }

    async fn movies_nominated_and_awarded(&self) -> StoreResult<Vec<AwardedMovieRow>> {
        let rows = CassandraAnalytics::movies_nominated_and_awarded(&self.cql).await?;
        Ok(rows.into_iter().map(AwardedMovieRow::Cassandra).collect())
    }

    async fn most_awarded_movies(&self) -> StoreResult<Vec<MostAwardedMovieRow>> {
        let rows = CassandraAnalytics::most_awarded_movies(&self.cql).await?;
        Ok(rows.into_iter().map(MostAwardedMovieRow::Cassandra).collect())
    }

    async fn nominated_never_won(&self) -> StoreResult<Vec<NeverWonRow>> {
        let rows = CassandraAnalytics::nominated_never_won(&self.cql).await?;
        Ok(rows.into_iter().map(NeverWonRow::Cassandra).collect())
    }

    async fn most_awarded_actor(&self) -> StoreResult<MostAwardedActorRow> {
        let row = CassandraAnalytics::most_awarded_actor(&self.cql).await?;
        Ok(MostAwardedActorRow::Cassandra(row))
    }

    async fn vote_extremes(&self) -> StoreResult<VoteExtremesRow> {
        let rows = CassandraAnalytics::vote_extremes(&self.cql).await?;
        Ok(VoteExtremesRow::Cassandra(rows))
    }

    async fn director_nominations(&self, query: &NameQuery) -> StoreResult<Vec<DirectorRow>> {
        let rows = CassandraAnalytics::director_nominations(&self.cql, query).await?;
        Ok(rows.into_iter().map(DirectorRow::Cassandra).collect())
    }
}

#[async_trait]
impl CatalogStore for CassandraStore {
    async fn list_movies(&self, use_case: UseCase) -> StoreResult<Vec<MovieRecord>> {
        SnapshotRepo::list_movies(&self.cql, use_case).await
    }

    async fn create_movie(&self, input: &MovieInput, use_case: UseCase) -> StoreResult<MutationAck> {
        validate_movie_input(input)?;
        let key = MovieKey::new(input.title.trim(), input.year);
        if SnapshotRepo::movie(&self.cql, &key).await?.is_some() {
            return Err(CoreError::Conflict(format!("Movie '{key}' already exists")).into());
        }
        let input = MovieInput {
            title: key.title.clone(),
            ..input.clone()
        };
        self.cql.run_plan(plan_movie_insert(&input, use_case)).await?;
        tracing::info!(movie_id = %key, %use_case, "Movie created");
        Ok(MutationAck::ok(key.to_string()))
    }

    async fn update_movie(
        &self,
        id: &str,
        changes: &MovieChanges,
        use_case: UseCase,
    ) -> StoreResult<MutationAck> {
        let key: MovieKey = id.parse()?;
        validate_movie_changes(changes)?;
        let snapshot = self.movie_snapshot(&key).await?;
        let changes = MovieChanges {
            title: changes.title.as_deref().map(|t| t.trim().to_string()),
            ..changes.clone()
        };
        let new_key = MovieKey::new(
            changes.title.clone().unwrap_or_else(|| key.title.clone()),
            changes.year.unwrap_or(key.year),
        );
        if new_key != key && SnapshotRepo::movie(&self.cql, &new_key).await?.is_some() {
            return Err(CoreError::Conflict(format!("Movie '{new_key}' already exists")).into());
        }
        self.cql
            .run_plan(plan_movie_update(&snapshot, &changes, use_case))
            .await?;
        Ok(MutationAck::ok(new_key.to_string()))
    }

    async fn delete_movie(&self, id: &str, use_case: UseCase) -> StoreResult<MutationAck> {
        let key: MovieKey = id.parse()?;
        let snapshot = self.movie_snapshot(&key).await?;
        self.cql.run_plan(plan_movie_delete(&snapshot, use_case)).await?;
        Ok(MutationAck::ok(id))
    }

    async fn list_professionals(&self) -> StoreResult<Vec<ProfessionalRecord>> {
        SnapshotRepo::list_professionals(&self.cql).await
    }

    async fn create_professional(&self, input: &ProfessionalInput) -> StoreResult<MutationAck> {
        validate_professional_input(input)?;
        let name = input.full_name();
        if SnapshotRepo::professional(&self.cql, &name).await?.is_some() {
            return Err(CoreError::Conflict(format!("Professional '{name}' already exists")).into());
        }
        self.cql.run_plan(plan_professional_insert(input)).await?;
        tracing::info!(professional_id = %name, "Professional created");
        Ok(MutationAck::ok(name))
    }

    async fn update_professional(
        &self,
        id: &str,
        changes: &ProfessionalChanges,
    ) -> StoreResult<MutationAck> {
        validate_professional_changes(changes)?;
        let snapshot = self.professional_snapshot(id).await?;
        let statements = plan_professional_update(&snapshot, changes);
        self.cql.run_plan(statements).await?;
        let (first, last) = split_full_name(id);
        let name = join_name(
            changes.first_name.as_deref().map_or(first, str::trim),
            changes.last_name.as_deref().map_or(last, str::trim),
        );
        Ok(MutationAck::ok(name))
    }

    async fn delete_professional(&self, id: &str) -> StoreResult<MutationAck> {
        let snapshot = self.professional_snapshot(id).await?;
        self.cql.run_plan(plan_professional_delete(&snapshot)).await?;
        Ok(MutationAck::ok(id))
    }

    /// Wide-column nominations are recorded against the movie tables only;
    /// `professional_id` is ignored here.
    async fn create_nomination(&self, input: &NominationInput) -> StoreResult<MutationAck> {
        validate_nomination_input(input)?;
        let key = NominationKey {
            movie: input.movie_id.parse()?,
            category: input.category.trim().to_string(),
        };
        let snapshot = self.movie_snapshot(&key.movie).await?;
        let statements = plan_nomination_insert(&snapshot, &key.category, input.result)?;
        self.cql.run_plan(statements).await?;
        tracing::info!(nomination_id = %key, "Nomination created");
        Ok(MutationAck::ok(key.to_string()))
    }

    async fn update_nomination(
        &self,
        id: &str,
        changes: &NominationChanges,
    ) -> StoreResult<MutationAck> {
        let key: NominationKey = id.parse()?;
        let snapshot = self.movie_snapshot(&key.movie).await?;
        let statements = plan_nomination_result_change(&snapshot, &key.category, changes.result)?;
        self.cql.run_plan(statements).await?;
        Ok(MutationAck::ok(id))
    }

    async fn delete_nomination(&self, id: &str) -> StoreResult<MutationAck> {
        let key: NominationKey = id.parse()?;
        let snapshot = self.movie_snapshot(&key.movie).await?;
        let statements = plan_nomination_delete(&snapshot, &key.category)?;
        self.cql.run_plan(statements).await?;
        Ok(MutationAck::ok(id))
    }
}

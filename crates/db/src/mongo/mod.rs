//! Document adapter (MongoDB).
//!
//! Movies and professionals are documents with their nominations embedded;
//! votes are a flat collection aggregated on demand.

pub mod analytics;
pub mod movie_repo;
pub mod nomination_repo;
pub mod professional_repo;

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{doc, Bson};
use mongodb::{Client, Database};
use oscars_core::backend::Backend;
use oscars_core::catalog::{
    validate_movie_changes, validate_movie_input, validate_nomination_input,
    validate_professional_changes, validate_professional_input, MovieChanges, MovieInput,
    MovieRecord, MutationAck, NominationChanges, NominationInput, ProfessionalChanges,
    ProfessionalInput, ProfessionalRecord,
};
use oscars_core::error::CoreError;
use oscars_core::search::NameQuery;
use oscars_core::wide_column::UseCase;

pub use analytics::MongoAnalytics;
pub use movie_repo::MovieRepo;
pub use nomination_repo::{DocumentNominationId, NominationRepo};
pub use professional_repo::ProfessionalRepo;

use crate::error::{StoreError, StoreResult};
use crate::models::{
    AwardedMovieRow, DirectorRow, MostAwardedActorRow, MostAwardedMovieRow, NeverWonRow,
    NominatedMovieRow, VoteExtremesRow,
};
use crate::store::{AnalyticsStore, CatalogStore};

/// Parse a document id from its hex form.
pub(crate) fn parse_object_id(entity: &'static str, id: &str) -> StoreResult<ObjectId> {
    ObjectId::parse_str(id)
        .map_err(|_| CoreError::Validation(format!("Invalid {entity} id '{id}'")).into())
}

pub(crate) fn inserted_object_id(id: Bson) -> StoreResult<ObjectId> {
    id.as_object_id().ok_or_else(|| {
        CoreError::Internal(format!("Expected an ObjectId for the inserted document, got {id}")).into()
    })
}

/// Document store bound to one database.
#[derive(Clone)]
pub struct MongoStore {
    client: Client,
    db: Database,
}

impl MongoStore {
    /// Connect and bind to `database`. The driver connects lazily, so this
    /// only fails on a malformed URI.
    pub async fn connect(uri: &str, database: &str) -> StoreResult<Self> {
        let client = Client::with_uri_str(uri).await?;
        let db = client.database(database);
        Ok(Self { client, db })
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Close the driver's connection pools.
    pub async fn shutdown(self) {
        self.client.shutdown().await;
    }
}

#[async_trait]
impl AnalyticsStore for MongoStore {
    fn backend(&self) -> Backend {
        Backend::Mongo
    }

    async fn ping(&self) -> StoreResult<()> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    async fn movies_nominated(&self) -> StoreResult<Vec<NominatedMovieRow>> {
        let docs = MongoAnalytics::movies_nominated(&self.db).await?;
        Ok(docs.into_iter().map(NominatedMovieRow::Mongo).collect())
    }

    async fn movies_nominated_and_awarded(&self) -> StoreResult<Vec<AwardedMovieRow>> {
        let docs = MongoAnalytics::movies_nominated_and_awarded(&self.db).await?;
        Ok(docs.into_iter().map(AwardedMovieRow::Mongo).collect())
    }

    async fn most_awarded_movies(&self) -> StoreResult<Vec<MostAwardedMovieRow>> {
        let docs = MongoAnalytics::most_awarded_movies(&self.db).await?;
        Ok(docs.into_iter().map(MostAwardedMovieRow::Mongo).collect())
    }

    async fn nominated_never_won(&self) -> StoreResult<Vec<NeverWonRow>> {
        let docs = MongoAnalytics::nominated_never_won(&self.db).await?;
        Ok(docs.into_iter().map(NeverWonRow::Mongo).collect())
    }

    async fn most_awarded_actor(&self) -> StoreResult<MostAwardedActorRow> {
        let doc = MongoAnalytics::most_awarded_actor(&self.db).await?;
        Ok(MostAwardedActorRow::Mongo(doc))
    }

    async fn vote_extremes(&self) -> StoreResult<VoteExtremesRow> {
        let extremes = MongoAnalytics::vote_extremes(&self.db).await?;
        Ok(VoteExtremesRow::Mongo(extremes))
    }

    async fn director_nominations(&self, query: &NameQuery) -> StoreResult<Vec<DirectorRow>> {
        let docs = MongoAnalytics::director_nominations(&self.db, query).await?;
        Ok(docs.into_iter().map(DirectorRow::Mongo).collect())
    }
}

#[async_trait]
impl CatalogStore for MongoStore {
    async fn list_movies(&self, _use_case: UseCase) -> StoreResult<Vec<MovieRecord>> {
        MovieRepo::list(&self.db).await
    }

    async fn create_movie(&self, input: &MovieInput, _use_case: UseCase) -> StoreResult<MutationAck> {
        validate_movie_input(input)?;
        let id = MovieRepo::create(&self.db, input).await?.to_hex();
        tracing::info!(movie_id = %id, "Movie created");
        Ok(MutationAck::ok(id))
    }

    async fn update_movie(
        &self,
        id: &str,
        changes: &MovieChanges,
        _use_case: UseCase,
    ) -> StoreResult<MutationAck> {
        validate_movie_changes(changes)?;
        if !MovieRepo::update(&self.db, id, changes).await? {
            return Err(StoreError::not_found("Movie", id));
        }
        Ok(MutationAck::ok(id))
    }

    async fn delete_movie(&self, id: &str, _use_case: UseCase) -> StoreResult<MutationAck> {
        if !MovieRepo::delete(&self.db, id).await? {
            return Err(StoreError::not_found("Movie", id));
        }
        Ok(MutationAck::ok(id))
    }

    async fn list_professionals(&self) -> StoreResult<Vec<ProfessionalRecord>> {
        ProfessionalRepo::list(&self.db).await
    }

    async fn create_professional(&self, input: &ProfessionalInput) -> StoreResult<MutationAck> {
        validate_professional_input(input)?;
        let id = ProfessionalRepo::create(&self.db, input).await?.to_hex();
        tracing::info!(professional_id = %id, "Professional created");
        Ok(MutationAck::ok(id))
    }

    async fn update_professional(
        &self,
        id: &str,
        changes: &ProfessionalChanges,
    ) -> StoreResult<MutationAck> {
        validate_professional_changes(changes)?;
        if !ProfessionalRepo::update(&self.db, id, changes).await? {
            return Err(StoreError::not_found("Professional", id));
        }
        Ok(MutationAck::ok(id))
    }

    async fn delete_professional(&self, id: &str) -> StoreResult<MutationAck> {
        if !ProfessionalRepo::delete(&self.db, id).await? {
            return Err(StoreError::not_found("Professional", id));
        }
        Ok(MutationAck::ok(id))
    }

    async fn create_nomination(&self, input: &NominationInput) -> StoreResult<MutationAck> {
        validate_nomination_input(input)?;
        let id = DocumentNominationId {
            movie: parse_object_id("movie", &input.movie_id)?,
            category: input.category.trim().to_string(),
            year: input.year,
        };
        let professional = input
            .professional_id
            .as_deref()
            .map(|raw| parse_object_id("professional", raw))
            .transpose()?;
        NominationRepo::create(&self.db, &id, input.result, professional).await?;
        tracing::info!(nomination_id = %id, "Nomination created");
        Ok(MutationAck::ok(id.to_string()))
    }

    async fn update_nomination(
        &self,
        id: &str,
        changes: &NominationChanges,
    ) -> StoreResult<MutationAck> {
        let parsed: DocumentNominationId = id.parse()?;
        NominationRepo::update_result(&self.db, &parsed, changes.result).await?;
        Ok(MutationAck::ok(id))
    }

    async fn delete_nomination(&self, id: &str) -> StoreResult<MutationAck> {
        let parsed: DocumentNominationId = id.parse()?;
        NominationRepo::delete(&self.db, &parsed).await?;
        Ok(MutationAck::ok(id))
    }
}

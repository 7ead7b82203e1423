//! The seams between the HTTP layer and the three backends.

use async_trait::async_trait;
use oscars_core::backend::Backend;
use oscars_core::catalog::{
    MovieChanges, MovieInput, MovieRecord, MutationAck, NominationChanges, NominationInput,
    ProfessionalChanges, ProfessionalInput, ProfessionalRecord,
};
use oscars_core::search::NameQuery;
use oscars_core::wide_column::UseCase;

use crate::error::StoreResult;
use crate::models::{
    AwardedMovieRow, DirectorRow, MostAwardedActorRow, MostAwardedMovieRow, NeverWonRow,
    NominatedMovieRow, VoteExtremesRow,
};

/// The analytical questions, answered natively by each backend.
///
/// Singleton questions fail with a not-found error when the store holds no
/// candidate. List questions return an empty list instead.
#[async_trait]
pub trait AnalyticsStore: Send + Sync {
    fn backend(&self) -> Backend;

    /// Cheap round trip proving the backend is reachable.
    async fn ping(&self) -> StoreResult<()>;

    async fn movies_nominated(&self) -> StoreResult<Vec<NominatedMovieRow>>;

    async fn movies_nominated_and_awarded(&self) -> StoreResult<Vec<AwardedMovieRow>>;

    async fn most_awarded_movies(&self) -> StoreResult<Vec<MostAwardedMovieRow>>;

    async fn nominated_never_won(&self) -> StoreResult<Vec<NeverWonRow>>;

    async fn most_awarded_actor(&self) -> StoreResult<MostAwardedActorRow>;

    async fn vote_extremes(&self) -> StoreResult<VoteExtremesRow>;

    async fn director_nominations(&self, query: &NameQuery) -> StoreResult<Vec<DirectorRow>>;
}

/// Admin create / update / delete / list.
///
/// `use_case` only changes behaviour on the wide-column backend; the other
/// backends ignore it.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn list_movies(&self, use_case: UseCase) -> StoreResult<Vec<MovieRecord>>;

    async fn create_movie(&self, input: &MovieInput, use_case: UseCase) -> StoreResult<MutationAck>;

    async fn update_movie(
        &self,
        id: &str,
        changes: &MovieChanges,
        use_case: UseCase,
    ) -> StoreResult<MutationAck>;

    async fn delete_movie(&self, id: &str, use_case: UseCase) -> StoreResult<MutationAck>;

    async fn list_professionals(&self) -> StoreResult<Vec<ProfessionalRecord>>;

    async fn create_professional(&self, input: &ProfessionalInput) -> StoreResult<MutationAck>;

    async fn update_professional(
        &self,
        id: &str,
        changes: &ProfessionalChanges,
    ) -> StoreResult<MutationAck>;

    async fn delete_professional(&self, id: &str) -> StoreResult<MutationAck>;

    async fn create_nomination(&self, input: &NominationInput) -> StoreResult<MutationAck>;

    async fn update_nomination(
        &self,
        id: &str,
        changes: &NominationChanges,
    ) -> StoreResult<MutationAck>;

    async fn delete_nomination(&self, id: &str) -> StoreResult<MutationAck>;
}

/// A backend serving both the analytics and the admin surface.
pub trait DataStore: AnalyticsStore + CatalogStore {}

impl<T: AnalyticsStore + CatalogStore> DataStore for T {}

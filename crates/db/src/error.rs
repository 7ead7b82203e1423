use oscars_core::error::CoreError;
use scylla::deserialize::DeserializationError;
use scylla::transport::errors::{NewSessionError, QueryError};
use scylla::transport::query_result::{IntoRowsResultError, RowsError};

/// Failure of a store call, whichever backend raised it.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("BSON encoding error: {0}")]
    BsonSer(#[from] bson::ser::Error),

    #[error("BSON decoding error: {0}")]
    BsonDe(#[from] bson::de::Error),

    #[error("Cassandra query error: {0}")]
    CassandraQuery(#[from] QueryError),

    #[error("Cassandra session error: {0}")]
    CassandraSession(#[from] NewSessionError),

    #[error("Cassandra result error: {0}")]
    CassandraResult(#[from] IntoRowsResultError),

    #[error("Cassandra rows error: {0}")]
    CassandraRows(#[from] RowsError),

    #[error("Cassandra row decoding error: {0}")]
    CassandraDecode(#[from] DeserializationError),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    /// Shorthand for a not-found error.
    pub fn not_found(entity: &'static str, id: impl std::fmt::Display) -> Self {
        StoreError::Core(CoreError::not_found(entity, id))
    }

    /// Whether the error is a unique-constraint violation in the relational store.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            StoreError::Sql(sqlx::Error::Database(db_err)) => db_err.is_unique_violation(),
            StoreError::Core(CoreError::Conflict(_)) => true,
            _ => false,
        }
    }
}

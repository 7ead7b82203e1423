//! Store adapters for the three backends.
//!
//! Each backend gets a module with its connection bootstrap and an adapter
//! implementing [`store::AnalyticsStore`] and [`store::CatalogStore`]. Raw
//! rows keep their native layout (see [`models`]) and are mapped into the
//! canonical display shapes by [`normalize`].

pub mod cassandra;
pub mod error;
pub mod models;
pub mod mongo;
pub mod normalize;
pub mod sql;
pub mod store;

use sqlx::postgres::PgPoolOptions;

pub use cassandra::CassandraStore;
pub use error::{StoreError, StoreResult};
pub use mongo::MongoStore;
pub use sql::SqlStore;
pub use store::{AnalyticsStore, CatalogStore, DataStore};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Run a trivial query to confirm the relational store is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}

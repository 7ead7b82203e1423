use std::sync::Arc;

use oscars_core::backend::Backend;
use oscars_db::DataStore;

use crate::config::ServerConfig;

/// The three store adapters, one per backend.
pub struct Stores {
    pub mongo: Arc<dyn DataStore>,
    pub cassandra: Arc<dyn DataStore>,
    pub sql: Arc<dyn DataStore>,
}

impl Stores {
    pub fn get(&self, backend: Backend) -> &Arc<dyn DataStore> {
        match backend {
            Backend::Mongo => &self.mongo,
            Backend::Cassandra => &self.cassandra,
            Backend::Sql => &self.sql,
        }
    }
}

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Store adapters, constructed once at startup.
    pub stores: Arc<Stores>,
}

impl AppState {
    pub fn new(config: ServerConfig, stores: Stores) -> Self {
        Self {
            config: Arc::new(config),
            stores: Arc::new(stores),
        }
    }
}

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` when every backend answers, `degraded` otherwise.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    pub backends: BackendHealth,
}

/// Reachability per backend.
#[derive(Serialize)]
pub struct BackendHealth {
    pub mongo: bool,
    pub cassandra: bool,
    pub sql: bool,
}

/// GET /health -- returns service and per-backend health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let stores = &state.stores;
    let (mongo, cassandra, sql) = tokio::join!(
        stores.mongo.ping(),
        stores.cassandra.ping(),
        stores.sql.ping(),
    );

    for (backend, result) in [("mongo", &mongo), ("cassandra", &cassandra), ("sql", &sql)] {
        if let Err(err) = result {
            tracing::warn!(backend, error = %err, "Backend health check failed");
        }
    }

    let backends = BackendHealth {
        mongo: mongo.is_ok(),
        cassandra: cassandra.is_ok(),
        sql: sql.is_ok(),
    };
    let status = if backends.mongo && backends.cassandra && backends.sql {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        backends,
    })
}

/// Mount health check routes (root level, not under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use oscars_api::config::{BackendConfig, ServerConfig};
use oscars_api::router::build_app_router;
use oscars_api::state::{AppState, Stores};
use oscars_db::{CassandraStore, MongoStore, SqlStore};

const CQL_SCHEMA: &str = include_str!("../../../db/cql/schema.cql");

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "oscars_api=debug,oscars_db=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    let backends = BackendConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Relational store ---
    let pool = oscars_db::create_pool(&backends.database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    oscars_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    oscars_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Document store ---
    let mongo = MongoStore::connect(&backends.mongodb_url, &backends.mongodb_database)
        .await
        .expect("Invalid MONGODB_URL");
    tracing::info!(database = %backends.mongodb_database, "MongoDB client created");

    // --- Wide-column store ---
    let cassandra = CassandraStore::connect(&backends.cassandra_nodes, &backends.cassandra_keyspace)
        .await
        .expect("Failed to connect to Cassandra");

    if backends.cassandra_apply_schema {
        cassandra
            .apply_schema(CQL_SCHEMA)
            .await
            .expect("Failed to apply CQL schema");
        tracing::info!(keyspace = %backends.cassandra_keyspace, "CQL schema applied");
    }

    // --- App state ---
    let stores = Stores {
        mongo: Arc::new(mongo.clone()),
        cassandra: Arc::new(cassandra),
        sql: Arc::new(SqlStore::new(pool.clone())),
    };
    let state = AppState::new(config.clone(), stores);

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");
    let grace = Duration::from_secs(config.shutdown_timeout_secs);

    if tokio::time::timeout(grace, pool.close()).await.is_err() {
        tracing::warn!("Timed out closing the database pool");
    }
    tracing::info!("Database pool closed");

    if tokio::time::timeout(grace, mongo.shutdown()).await.is_err() {
        tracing::warn!("Timed out shutting down the MongoDB client");
    }
    tracing::info!("MongoDB client shut down");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}

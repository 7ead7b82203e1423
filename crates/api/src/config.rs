/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Upper bound on connection draining after a shutdown signal (default: `30`).
    pub shutdown_timeout_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = comma_list(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
        }
    }
}

/// Connection settings for the three backends.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub database_url: String,
    pub mongodb_url: String,
    pub mongodb_database: String,
    pub cassandra_nodes: Vec<String>,
    pub cassandra_keyspace: String,
    /// Run the bundled CQL schema against the cluster at startup.
    pub cassandra_apply_schema: bool,
}

impl BackendConfig {
    /// Load backend settings from environment variables.
    ///
    /// | Env Var                  | Default                     |
    /// |--------------------------|-----------------------------|
    /// | `DATABASE_URL`           | required                    |
    /// | `MONGODB_URL`            | `mongodb://localhost:27017` |
    /// | `MONGODB_DATABASE`       | `oscars`                    |
    /// | `CASSANDRA_NODES`        | `127.0.0.1:9042`            |
    /// | `CASSANDRA_KEYSPACE`     | `oscars`                    |
    /// | `CASSANDRA_APPLY_SCHEMA` | `false`                     |
    pub fn from_env() -> Self {
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let mongodb_url =
            std::env::var("MONGODB_URL").unwrap_or_else(|_| "mongodb://localhost:27017".into());
        let mongodb_database = std::env::var("MONGODB_DATABASE").unwrap_or_else(|_| "oscars".into());

        let cassandra_nodes = comma_list(
            &std::env::var("CASSANDRA_NODES").unwrap_or_else(|_| "127.0.0.1:9042".into()),
        );
        let cassandra_keyspace =
            std::env::var("CASSANDRA_KEYSPACE").unwrap_or_else(|_| "oscars".into());

        let cassandra_apply_schema: bool = std::env::var("CASSANDRA_APPLY_SCHEMA")
            .unwrap_or_else(|_| "false".into())
            .parse()
            .expect("CASSANDRA_APPLY_SCHEMA must be true or false");

        Self {
            database_url,
            mongodb_url,
            mongodb_database,
            cassandra_nodes,
            cassandra_keyspace,
            cassandra_apply_schema,
        }
    }
}

fn comma_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comma_list_drops_blanks() {
        assert_eq!(
            comma_list(" a:1, ,b:2,"),
            vec!["a:1".to_string(), "b:2".to_string()]
        );
    }
}

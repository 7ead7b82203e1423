//! The three database backends compared by the service.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Backend tag carried by every raw row and every panel outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Document store (MongoDB).
    Mongo,
    /// Wide-column store (Cassandra protocol).
    Cassandra,
    /// Relational store (PostgreSQL).
    Sql,
}

impl Backend {
    /// Every backend, in the order panels report them.
    pub const ALL: [Backend; 3] = [Backend::Mongo, Backend::Cassandra, Backend::Sql];

    /// Path segment / serialized name.
    pub fn as_str(self) -> &'static str {
        match self {
            Backend::Mongo => "mongo",
            Backend::Cassandra => "cassandra",
            Backend::Sql => "sql",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Backend::Mongo => "MongoDB",
            Backend::Cassandra => "Cassandra",
            Backend::Sql => "PostgreSQL",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Backend {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mongo" => Ok(Backend::Mongo),
            "cassandra" => Ok(Backend::Cassandra),
            "sql" => Ok(Backend::Sql),
            other => Err(CoreError::Validation(format!(
                "Unknown backend '{other}'. Must be one of: mongo, cassandra, sql"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn parses_every_path_segment() {
        for backend in Backend::ALL {
            assert_eq!(backend.as_str().parse::<Backend>().unwrap(), backend);
        }
    }

    #[test]
    fn rejects_unknown_backend() {
        assert_matches!("redis".parse::<Backend>(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn serializes_lowercase() {
        let json = serde_json::to_string(&Backend::Cassandra).unwrap();
        assert_eq!(json, "\"cassandra\"");
    }
}

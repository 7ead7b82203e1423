//! Per-backend outcomes of a normalized panel query.
//!
//! A panel asks all three backends the same question. Each answer settles
//! independently into exactly one [`PanelOutcome`], so a failing backend
//! never hides the others' results. An empty list is `empty`; a singleton
//! question with no candidate is a `NOT_FOUND` failure.

use oscars_core::backend::Backend;
use oscars_core::views::{Normalize, NormalizeContext};
use oscars_db::{StoreError, StoreResult};
use serde::Serialize;

use crate::error::AppError;

/// State of one backend's answer, serialized as
/// `{"state": "ready" | "empty" | "failed", ...}`.
#[derive(Debug, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum PanelOutcome<T> {
    Ready { data: T },
    Empty,
    Failed { code: &'static str, message: String },
}

impl<V> PanelOutcome<Vec<V>> {
    /// Settle a list answer. An empty list is `Empty`.
    pub fn from_list<R>(backend: Backend, result: StoreResult<Vec<R>>, ctx: &NormalizeContext) -> Self
    where
        R: Normalize<View = V>,
    {
        match result {
            Ok(rows) if rows.is_empty() => PanelOutcome::Empty,
            Ok(rows) => PanelOutcome::Ready {
                data: rows.normalize(ctx),
            },
            Err(err) => failed(backend, err),
        }
    }
}

impl<T> PanelOutcome<T> {
    /// Settle a singleton answer. A missing candidate fails with `NOT_FOUND`.
    pub fn from_single<R>(backend: Backend, result: StoreResult<R>, ctx: &NormalizeContext) -> Self
    where
        R: Normalize<View = T>,
    {
        match result {
            Ok(row) => PanelOutcome::Ready {
                data: row.normalize(ctx),
            },
            Err(err) => failed(backend, err),
        }
    }
}

fn failed<T>(backend: Backend, err: StoreError) -> PanelOutcome<T> {
    let err = AppError::Store(err);
    let (status, code, message) = err.classify();
    if status.is_server_error() {
        tracing::error!(backend = %backend, error = %err, "Panel query failed");
    } else {
        tracing::warn!(backend = %backend, error = %err, "Panel query rejected");
    }
    PanelOutcome::Failed { code, message }
}

/// One outcome per backend.
#[derive(Debug, Serialize)]
pub struct PanelSet<T> {
    pub mongo: PanelOutcome<T>,
    pub cassandra: PanelOutcome<T>,
    pub sql: PanelOutcome<T>,
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::NaiveDate;
    use oscars_core::error::CoreError;
    use oscars_core::views::VotedMovie;
    use serde_json::json;

    use super::*;

    #[derive(Debug)]
    struct Tally(i64);

    impl Normalize for Tally {
        type View = i64;

        fn normalize(&self, _ctx: &NormalizeContext) -> i64 {
            self.0
        }
    }

    fn ctx() -> NormalizeContext {
        NormalizeContext::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
    }

    #[test]
    fn empty_list_is_empty_not_ready() {
        let outcome = PanelOutcome::from_list(Backend::Sql, Ok(Vec::<Tally>::new()), &ctx());
        assert_matches!(outcome, PanelOutcome::Empty);
    }

    #[test]
    fn rows_are_normalized() {
        let outcome = PanelOutcome::from_list(Backend::Sql, Ok(vec![Tally(3), Tally(1)]), &ctx());
        assert_matches!(outcome, PanelOutcome::Ready { data } if data == vec![3, 1]);
    }

    #[test]
    fn not_found_singleton_fails_with_not_found() {
        let outcome: PanelOutcome<i64> = PanelOutcome::from_single(
            Backend::Sql,
            Err::<Tally, _>(StoreError::not_found("Professional", "most awarded")),
            &ctx(),
        );
        assert_matches!(
            outcome,
            PanelOutcome::Failed { code: "NOT_FOUND", ref message } if message.contains("most awarded")
        );
        assert_eq!(serde_json::to_value(&outcome).unwrap()["state"], "failed");
    }

    #[test]
    fn backend_failure_hides_the_cause() {
        let outcome: PanelOutcome<i64> = PanelOutcome::from_single(
            Backend::Cassandra,
            Err::<Tally, _>(StoreError::Core(CoreError::Internal("node down".to_string()))),
            &ctx(),
        );
        assert_matches!(
            outcome,
            PanelOutcome::Failed { code: "INTERNAL_ERROR", ref message } if !message.contains("node")
        );
    }

    #[test]
    fn serializes_with_state_tag() {
        let ready = PanelOutcome::Ready {
            data: VotedMovie {
                title: "Up".to_string(),
                votes: 4,
                category: String::new(),
                synopsis: String::new(),
                vote_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            },
        };
        let value = serde_json::to_value(&ready).unwrap();
        assert_eq!(value["state"], "ready");
        assert_eq!(value["data"]["title"], "Up");

        let empty: PanelOutcome<()> = PanelOutcome::Empty;
        assert_eq!(serde_json::to_value(&empty).unwrap(), json!({"state": "empty"}));

        let failed: PanelOutcome<()> = PanelOutcome::Failed {
            code: "INTERNAL_ERROR",
            message: "An internal error occurred".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            json!({"state": "failed", "code": "INTERNAL_ERROR", "message": "An internal error occurred"})
        );
    }
}

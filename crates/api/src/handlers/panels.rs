//! Handlers for the normalized comparison panels.
//!
//! Every panel asks the three backends concurrently and settles each answer
//! on its own: a slow or failing backend never blocks or fails the others.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use oscars_core::backend::Backend;
use oscars_core::views::NormalizeContext;

use crate::error::AppResult;
use crate::panels::{PanelOutcome, PanelSet};
use crate::query::SearchParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Ask all three stores the same question concurrently.
macro_rules! ask_all {
    ($stores:expr, $method:ident($($arg:expr),*)) => {
        tokio::join!(
            $stores.mongo.$method($($arg),*),
            $stores.cassandra.$method($($arg),*),
            $stores.sql.$method($($arg),*),
        )
    };
}

/// Settle the three answers with `$settle` (`from_list` or `from_single`).
macro_rules! settle {
    ($settle:ident, ($mongo:expr, $cassandra:expr, $sql:expr)) => {{
        let ctx = NormalizeContext::today();
        PanelSet {
            mongo: PanelOutcome::$settle(Backend::Mongo, $mongo, &ctx),
            cassandra: PanelOutcome::$settle(Backend::Cassandra, $cassandra, &ctx),
            sql: PanelOutcome::$settle(Backend::Sql, $sql, &ctx),
        }
    }};
}

/// GET /api/v1/panels/movie-nominations
pub async fn movie_nominations(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let (mongo, cassandra, sql) = ask_all!(state.stores, movies_nominated());
    let panels = settle!(from_list, (mongo, cassandra, sql));
    Ok(Json(DataResponse { data: panels }))
}

/// GET /api/v1/panels/movie-awards
pub async fn movie_awards(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let (mongo, cassandra, sql) = ask_all!(state.stores, movies_nominated_and_awarded());
    let panels = settle!(from_list, (mongo, cassandra, sql));
    Ok(Json(DataResponse { data: panels }))
}

/// GET /api/v1/panels/most-awarded-movies
pub async fn most_awarded_movies(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let (mongo, cassandra, sql) = ask_all!(state.stores, most_awarded_movies());
    let panels = settle!(from_list, (mongo, cassandra, sql));
    Ok(Json(DataResponse { data: panels }))
}

/// GET /api/v1/panels/nominated-never-won
pub async fn nominated_never_won(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let (mongo, cassandra, sql) = ask_all!(state.stores, nominated_never_won());
    let panels = settle!(from_list, (mongo, cassandra, sql));
    Ok(Json(DataResponse { data: panels }))
}

/// GET /api/v1/panels/most-awarded-actor
pub async fn most_awarded_actor(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let (mongo, cassandra, sql) = ask_all!(state.stores, most_awarded_actor());
    let panels = settle!(from_single, (mongo, cassandra, sql));
    Ok(Json(DataResponse { data: panels }))
}

/// GET /api/v1/panels/vote-extremes
pub async fn vote_extremes(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let (mongo, cassandra, sql) = ask_all!(state.stores, vote_extremes());
    let panels = settle!(from_single, (mongo, cassandra, sql));
    Ok(Json(DataResponse { data: panels }))
}

/// GET /api/v1/panels/director-nominations?q=
///
/// An empty query is rejected with 400 before any store is asked.
pub async fn director_nominations(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<impl IntoResponse> {
    let query = params.name_query()?;
    let (mongo, cassandra, sql) = ask_all!(state.stores, director_nominations(&query));
    let panels = settle!(from_list, (mongo, cassandra, sql));
    Ok(Json(DataResponse { data: panels }))
}

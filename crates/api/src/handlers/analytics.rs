//! Handlers for the per-backend analytical questions.
//!
//! Each route returns the backend's raw rows, tagged with their layout, so
//! the queries can be compared side by side. Singleton questions answer 404
//! when the backend holds no candidate.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::handlers::store_for;
use crate::query::SearchParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/{backend}/analytics/movies-nominated
///
/// The three most recent movies with at least one nomination.
pub async fn movies_nominated(
    State(state): State<AppState>,
    Path(backend): Path<String>,
) -> AppResult<impl IntoResponse> {
    let rows = store_for(&state, &backend)?.movies_nominated().await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/{backend}/analytics/movies-nominated-and-awarded
pub async fn movies_nominated_and_awarded(
    State(state): State<AppState>,
    Path(backend): Path<String>,
) -> AppResult<impl IntoResponse> {
    let rows = store_for(&state, &backend)?
        .movies_nominated_and_awarded()
        .await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/{backend}/analytics/most-awarded-movies
pub async fn most_awarded_movies(
    State(state): State<AppState>,
    Path(backend): Path<String>,
) -> AppResult<impl IntoResponse> {
    let rows = store_for(&state, &backend)?.most_awarded_movies().await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/{backend}/analytics/nominated-never-won
///
/// Professionals nominated more than three times without a win.
pub async fn nominated_never_won(
    State(state): State<AppState>,
    Path(backend): Path<String>,
) -> AppResult<impl IntoResponse> {
    let rows = store_for(&state, &backend)?.nominated_never_won().await?;
    Ok(Json(DataResponse { data: rows }))
}

/// GET /api/v1/{backend}/analytics/most-awarded-actor
pub async fn most_awarded_actor(
    State(state): State<AppState>,
    Path(backend): Path<String>,
) -> AppResult<impl IntoResponse> {
    let row = store_for(&state, &backend)?.most_awarded_actor().await?;
    Ok(Json(DataResponse { data: row }))
}

/// GET /api/v1/{backend}/analytics/vote-extremes
pub async fn vote_extremes(
    State(state): State<AppState>,
    Path(backend): Path<String>,
) -> AppResult<impl IntoResponse> {
    let row = store_for(&state, &backend)?.vote_extremes().await?;
    Ok(Json(DataResponse { data: row }))
}

/// GET /api/v1/{backend}/analytics/director-nominations?q=
///
/// The query is validated before the store is consulted.
pub async fn director_nominations(
    State(state): State<AppState>,
    Path(backend): Path<String>,
    Query(params): Query<SearchParams>,
) -> AppResult<impl IntoResponse> {
    let store = store_for(&state, &backend)?;
    let query = params.name_query()?;
    let rows = store.director_nominations(&query).await?;
    Ok(Json(DataResponse { data: rows }))
}

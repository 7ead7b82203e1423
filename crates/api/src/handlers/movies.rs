//! Admin handlers for movies on a single backend.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use oscars_core::catalog::{MovieChanges, MovieInput};

use crate::error::AppResult;
use crate::handlers::store_for;
use crate::query::UseCaseParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/{backend}/movies?use_case=
pub async fn list_movies(
    State(state): State<AppState>,
    Path(backend): Path<String>,
    Query(params): Query<UseCaseParams>,
) -> AppResult<impl IntoResponse> {
    let store = store_for(&state, &backend)?;
    let movies = store.list_movies(params.use_case()?).await?;
    Ok(Json(DataResponse { data: movies }))
}

/// POST /api/v1/{backend}/movies?use_case=
pub async fn create_movie(
    State(state): State<AppState>,
    Path(backend): Path<String>,
    Query(params): Query<UseCaseParams>,
    Json(input): Json<MovieInput>,
) -> AppResult<impl IntoResponse> {
    let store = store_for(&state, &backend)?;
    let ack = store.create_movie(&input, params.use_case()?).await?;

    tracing::info!(backend = %backend, movie_id = %ack.id, "Movie created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: ack })))
}

/// PUT /api/v1/{backend}/movies/{id}?use_case=
///
/// On the wide-column backend a title or year change re-keys the movie; the
/// acknowledgement carries the new id.
pub async fn update_movie(
    State(state): State<AppState>,
    Path((backend, id)): Path<(String, String)>,
    Query(params): Query<UseCaseParams>,
    Json(changes): Json<MovieChanges>,
) -> AppResult<impl IntoResponse> {
    let store = store_for(&state, &backend)?;
    let ack = store
        .update_movie(&id, &changes, params.use_case()?)
        .await?;

    tracing::info!(backend = %backend, movie_id = %ack.id, "Movie updated");

    Ok(Json(DataResponse { data: ack }))
}

/// DELETE /api/v1/{backend}/movies/{id}?use_case=
pub async fn delete_movie(
    State(state): State<AppState>,
    Path((backend, id)): Path<(String, String)>,
    Query(params): Query<UseCaseParams>,
) -> AppResult<impl IntoResponse> {
    let store = store_for(&state, &backend)?;
    let ack = store.delete_movie(&id, params.use_case()?).await?;

    tracing::info!(backend = %backend, movie_id = %id, "Movie deleted");

    Ok(Json(DataResponse { data: ack }))
}

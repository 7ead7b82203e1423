//! Admin handlers for nominations on a single backend.
//!
//! Nomination ids are backend-specific; see each store adapter for the
//! format it issues.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use oscars_core::catalog::{NominationChanges, NominationInput};

use crate::error::AppResult;
use crate::handlers::store_for;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/{backend}/nominations
pub async fn create_nomination(
    State(state): State<AppState>,
    Path(backend): Path<String>,
    Json(input): Json<NominationInput>,
) -> AppResult<impl IntoResponse> {
    let ack = store_for(&state, &backend)?
        .create_nomination(&input)
        .await?;

    tracing::info!(
        backend = %backend,
        nomination_id = %ack.id,
        result = ?input.result,
        "Nomination recorded",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: ack })))
}

/// PUT /api/v1/{backend}/nominations/{id}
///
/// Only the result can change.
pub async fn update_nomination(
    State(state): State<AppState>,
    Path((backend, id)): Path<(String, String)>,
    Json(changes): Json<NominationChanges>,
) -> AppResult<impl IntoResponse> {
    let ack = store_for(&state, &backend)?
        .update_nomination(&id, &changes)
        .await?;

    tracing::info!(backend = %backend, nomination_id = %id, result = ?changes.result, "Nomination updated");

    Ok(Json(DataResponse { data: ack }))
}

/// DELETE /api/v1/{backend}/nominations/{id}
pub async fn delete_nomination(
    State(state): State<AppState>,
    Path((backend, id)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    let ack = store_for(&state, &backend)?.delete_nomination(&id).await?;

    tracing::info!(backend = %backend, nomination_id = %id, "Nomination deleted");

    Ok(Json(DataResponse { data: ack }))
}

//! Admin handlers for professionals on a single backend.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use oscars_core::catalog::{ProfessionalChanges, ProfessionalInput};

use crate::error::AppResult;
use crate::handlers::store_for;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/{backend}/professionals
pub async fn list_professionals(
    State(state): State<AppState>,
    Path(backend): Path<String>,
) -> AppResult<impl IntoResponse> {
    let professionals = store_for(&state, &backend)?.list_professionals().await?;
    Ok(Json(DataResponse {
        data: professionals,
    }))
}

/// POST /api/v1/{backend}/professionals
pub async fn create_professional(
    State(state): State<AppState>,
    Path(backend): Path<String>,
    Json(input): Json<ProfessionalInput>,
) -> AppResult<impl IntoResponse> {
    let ack = store_for(&state, &backend)?
        .create_professional(&input)
        .await?;

    tracing::info!(backend = %backend, professional_id = %ack.id, "Professional created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: ack })))
}

/// PUT /api/v1/{backend}/professionals/{id}
pub async fn update_professional(
    State(state): State<AppState>,
    Path((backend, id)): Path<(String, String)>,
    Json(changes): Json<ProfessionalChanges>,
) -> AppResult<impl IntoResponse> {
    let ack = store_for(&state, &backend)?
        .update_professional(&id, &changes)
        .await?;

    tracing::info!(backend = %backend, professional_id = %ack.id, "Professional updated");

    Ok(Json(DataResponse { data: ack }))
}

/// DELETE /api/v1/{backend}/professionals/{id}
pub async fn delete_professional(
    State(state): State<AppState>,
    Path((backend, id)): Path<(String, String)>,
) -> AppResult<impl IntoResponse> {
    let ack = store_for(&state, &backend)?
        .delete_professional(&id)
        .await?;

    tracing::info!(backend = %backend, professional_id = %id, "Professional deleted");

    Ok(Json(DataResponse { data: ack }))
}

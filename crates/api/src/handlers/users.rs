//! Handlers for the user directory.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use opsconsole_core::error::CoreError;
use opsconsole_core::types::DbId;
use opsconsole_db::models::{NewUser, UpdateUser};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> CoreError {
    CoreError::NotFound { entity: "user", id }
}

/// GET /api/v1/users
pub async fn list_users(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let users = state.store.list_users().await?;
    Ok(Json(DataResponse { data: users }))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let user = state.store.get_user(id).await?.ok_or(not_found(id))?;
    Ok(Json(DataResponse { data: user }))
}

/// POST /api/v1/users
///
/// Returns 409 when the email is already taken.
pub async fn create_user(
    State(state): State<AppState>,
    Json(input): Json<NewUser>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let user = state.store.create_user(&input).await?;

    tracing::info!(user_id = user.id, role = %user.role, "User created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: user })))
}

/// PUT /api/v1/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let user = state
        .store
        .update_user(id, &input)
        .await?
        .ok_or(not_found(id))?;

    tracing::info!(user_id = id, "User updated");

    Ok(Json(DataResponse { data: user }))
}

/// DELETE /api/v1/users/{id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !state.store.delete_user(id).await? {
        return Err(not_found(id).into());
    }

    tracing::info!(user_id = id, "User deleted");

    Ok(StatusCode::NO_CONTENT)
}

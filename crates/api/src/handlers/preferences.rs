//! Console settings and the operator profile. Both are single documents:
//! `GET` returns the stored (or default) value, `PUT` replaces it whole.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use opsconsole_core::profile::OperatorProfile;
use opsconsole_core::settings::ConsoleSettings;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/settings
pub async fn get_settings(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let settings = state.store.get_settings().await?;
    Ok(Json(DataResponse { data: settings }))
}

/// PUT /api/v1/settings
pub async fn update_settings(
    State(state): State<AppState>,
    Json(input): Json<ConsoleSettings>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let settings = state.store.save_settings(&input).await?;

    tracing::info!(
        webhooks = settings.integrations.active_webhooks().len(),
        email = settings.notifications.email,
        "Console settings updated"
    );

    Ok(Json(DataResponse { data: settings }))
}

/// GET /api/v1/profile
pub async fn get_profile(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let profile = state.store.get_profile().await?;
    Ok(Json(DataResponse { data: profile }))
}

/// PUT /api/v1/profile
pub async fn update_profile(
    State(state): State<AppState>,
    Json(input): Json<OperatorProfile>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let profile = state.store.save_profile(&input).await?;

    tracing::info!("Operator profile updated");

    Ok(Json(DataResponse { data: profile }))
}

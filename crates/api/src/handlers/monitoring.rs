use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/monitoring/status
///
/// Latest reports from the in-process jobs. Both are `null` until the first
/// run completes, and stay `null` when monitoring is not configured.
pub async fn status(State(state): State<AppState>) -> impl IntoResponse {
    Json(DataResponse {
        data: state.monitoring.snapshot().await,
    })
}

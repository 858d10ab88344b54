//! Account helpers that need no session.

use axum::response::IntoResponse;
use axum::Json;
use opsconsole_core::password::analyze_password_strength;
use serde::Deserialize;

use crate::response::DataResponse;

#[derive(Debug, Deserialize)]
pub struct PasswordInput {
    pub password: String,
}

/// POST /api/v1/auth/password-strength
///
/// Scores the candidate password; the password itself is never logged.
pub async fn password_strength(Json(input): Json<PasswordInput>) -> impl IntoResponse {
    Json(DataResponse {
        data: analyze_password_strength(&input.password),
    })
}

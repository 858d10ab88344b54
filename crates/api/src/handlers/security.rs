//! Inbound auth-backend webhooks.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;
use opsconsole_core::error::CoreError;
use opsconsole_core::signature::{verify_signature, SIGNATURE_HEADER};
use opsconsole_monitor::auth::{parse_auth_event, process_auth_event};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/security/auth-events
///
/// When `AUTH_WEBHOOK_SECRET` is configured the raw body must carry a valid
/// `x-webhook-signature`; otherwise the request is rejected with 401 before
/// the body is parsed. Suspicious event types raise a security alert.
pub async fn receive_auth_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<impl IntoResponse> {
    if let Some(secret) = state.config.auth_webhook_secret.as_deref() {
        let signature = headers
            .get(SIGNATURE_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| CoreError::Unauthorized("Missing webhook signature".into()))?;

        if !verify_signature(secret, &body, signature) {
            tracing::warn!("Rejected auth event with invalid signature");
            return Err(CoreError::Unauthorized("Invalid webhook signature".into()).into());
        }
    }

    let event = parse_auth_event(&body)?;
    let outcome = process_auth_event(&event, state.alerts.as_ref()).await?;

    Ok(Json(DataResponse { data: outcome }))
}

use axum::routing::post;
use axum::Router;

use crate::handlers::security;
use crate::state::AppState;

/// Security webhook routes mounted at `/security`.
pub fn router() -> Router<AppState> {
    Router::new().route("/auth-events", post(security::receive_auth_event))
}

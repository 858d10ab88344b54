use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Auth helper routes mounted at `/auth`.
pub fn router() -> Router<AppState> {
    Router::new().route("/password-strength", post(auth::password_strength))
}

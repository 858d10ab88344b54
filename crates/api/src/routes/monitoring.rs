use axum::routing::get;
use axum::Router;

use crate::handlers::monitoring;
use crate::state::AppState;

/// Monitoring routes mounted at `/monitoring`.
pub fn router() -> Router<AppState> {
    Router::new().route("/status", get(monitoring::status))
}

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::chat;
use crate::state::AppState;

/// Chat routes mounted at `/chat`.
///
/// ```text
/// POST /               -> send_message
/// GET  /history        -> history
/// GET  /quick-actions  -> quick_actions
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(chat::send_message))
        .route("/history", get(chat::history))
        .route("/quick-actions", get(chat::quick_actions))
}

pub mod analytics;
pub mod auth;
pub mod chat;
pub mod health;
pub mod monitoring;
pub mod preferences;
pub mod security;
pub mod tickets;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /chat                        send message (POST)
/// /chat/history                exchanges for ?user_id= (GET)
/// /chat/quick-actions          canned prompts (GET)
///
/// /tickets                     list, create
/// /tickets/stats               per-status counts
/// /tickets/{id}                get, update, delete
///
/// /users                       list, create
/// /users/{id}                  get, update, delete
///
/// /dashboard                   landing summary
/// /growth                      monthly trends
/// /sla                         compliance report
///
/// /settings                    get, replace
/// /profile                     get, replace
///
/// /auth/password-strength      score a password (POST)
/// /security/auth-events        auth-backend webhook (POST)
/// /monitoring/status           latest monitor reports
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/chat", chat::router())
        .nest("/tickets", tickets::router())
        .nest("/users", users::router())
        .merge(analytics::router())
        .merge(preferences::router())
        .nest("/auth", auth::router())
        .nest("/security", security::router())
        .nest("/monitoring", monitoring::router())
}

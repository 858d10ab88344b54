use axum::routing::get;
use axum::Router;

use crate::handlers::preferences;
use crate::state::AppState;

/// Settings and profile routes, merged at the `/api/v1` root.
///
/// ```text
/// GET /settings  -> get_settings
/// PUT /settings  -> update_settings
/// GET /profile   -> get_profile
/// PUT /profile   -> update_profile
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/settings",
            get(preferences::get_settings).put(preferences::update_settings),
        )
        .route(
            "/profile",
            get(preferences::get_profile).put(preferences::update_profile),
        )
}

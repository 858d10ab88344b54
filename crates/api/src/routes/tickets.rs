use axum::routing::get;
use axum::Router;

use crate::handlers::tickets;
use crate::state::AppState;

/// Ticket routes mounted at `/tickets`.
///
/// ```text
/// GET    /        -> list_tickets
/// POST   /        -> create_ticket
/// GET    /stats   -> ticket_stats
/// GET    /{id}    -> get_ticket
/// PUT    /{id}    -> update_ticket
/// DELETE /{id}    -> delete_ticket
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(tickets::list_tickets).post(tickets::create_ticket),
        )
        .route("/stats", get(tickets::ticket_stats))
        .route(
            "/{id}",
            get(tickets::get_ticket)
                .put(tickets::update_ticket)
                .delete(tickets::delete_ticket),
        )
}

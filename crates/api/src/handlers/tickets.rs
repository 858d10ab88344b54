//! Handlers for the ticket triage board.
//!
//! Create, update and delete publish `ticket.*` events on the bus.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use opsconsole_core::error::CoreError;
use opsconsole_core::ticket::{TicketFilter, TicketStats};
use opsconsole_core::types::DbId;
use opsconsole_db::models::{NewTicket, Ticket, UpdateTicket};
use opsconsole_events::bus::{TICKET_CREATED, TICKET_DELETED, TICKET_UPDATED};
use opsconsole_events::PlatformEvent;
use serde::Deserialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

const ENTITY: &str = "ticket";

/// Query parameters for `GET /tickets`.
///
/// `status` and `priority` arrive as free text so the board's `all` tab and
/// display labels such as `In Progress` are accepted.
#[derive(Debug, Default, Deserialize)]
pub struct TicketListParams {
    pub search: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
}

impl TicketListParams {
    pub fn into_filter(self) -> Result<TicketFilter, CoreError> {
        Ok(TicketFilter {
            search: self.search.filter(|s| !s.trim().is_empty()),
            status: parse_tab(self.status.as_deref())?,
            priority: parse_tab(self.priority.as_deref())?,
        })
    }
}

/// `None`, empty and `all` mean no filter.
fn parse_tab<T>(value: Option<&str>) -> Result<Option<T>, CoreError>
where
    T: std::str::FromStr<Err = CoreError>,
{
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) if v.eq_ignore_ascii_case("all") => Ok(None),
        Some(v) => v.parse().map(Some),
    }
}

fn not_found(id: DbId) -> CoreError {
    CoreError::NotFound { entity: ENTITY, id }
}

fn ticket_event(event_type: &str, ticket: &Ticket) -> PlatformEvent {
    PlatformEvent::new(event_type)
        .with_source(ENTITY, ticket.id)
        .with_payload(serde_json::json!({
            "key": ticket.key,
            "title": ticket.title,
            "status": ticket.status,
            "priority": ticket.priority,
            "assigned_to": ticket.assigned_to,
        }))
}

/// GET /api/v1/tickets?search=&status=&priority=
pub async fn list_tickets(
    State(state): State<AppState>,
    Query(params): Query<TicketListParams>,
) -> AppResult<impl IntoResponse> {
    let filter = params.into_filter()?;
    let tickets = state.store.list_tickets(&filter).await?;
    Ok(Json(DataResponse { data: tickets }))
}

/// GET /api/v1/tickets/stats
pub async fn ticket_stats(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let tickets = state.store.list_tickets(&TicketFilter::default()).await?;
    let stats = TicketStats::from_tickets(&tickets);
    Ok(Json(DataResponse { data: stats }))
}

/// GET /api/v1/tickets/{id}
pub async fn get_ticket(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let ticket = state.store.get_ticket(id).await?.ok_or(not_found(id))?;
    Ok(Json(DataResponse { data: ticket }))
}

/// POST /api/v1/tickets
pub async fn create_ticket(
    State(state): State<AppState>,
    Json(input): Json<NewTicket>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let ticket = state.store.create_ticket(&input).await?;

    tracing::info!(
        ticket_id = ticket.id,
        key = %ticket.key,
        priority = %ticket.priority,
        "Ticket created"
    );
    state.event_bus.publish(ticket_event(TICKET_CREATED, &ticket));

    Ok((StatusCode::CREATED, Json(DataResponse { data: ticket })))
}

/// PUT /api/v1/tickets/{id}
pub async fn update_ticket(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTicket>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let ticket = state
        .store
        .update_ticket(id, &input)
        .await?
        .ok_or(not_found(id))?;

    tracing::info!(ticket_id = id, status = %ticket.status, "Ticket updated");
    state.event_bus.publish(ticket_event(TICKET_UPDATED, &ticket));

    Ok(Json(DataResponse { data: ticket }))
}

/// DELETE /api/v1/tickets/{id}
pub async fn delete_ticket(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !state.store.delete_ticket(id).await? {
        return Err(not_found(id).into());
    }

    tracing::info!(ticket_id = id, "Ticket deleted");
    state
        .event_bus
        .publish(PlatformEvent::new(TICKET_DELETED).with_source(ENTITY, id));

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use opsconsole_core::ticket::{TicketPriority, TicketStatus};

    use super::*;

    fn params(status: Option<&str>, priority: Option<&str>) -> TicketListParams {
        TicketListParams {
            search: Some("  ".into()),
            status: status.map(Into::into),
            priority: priority.map(Into::into),
        }
    }

    #[test]
    fn all_tab_means_no_filter() {
        let filter = params(Some("all"), Some("ALL")).into_filter().unwrap();
        assert_eq!(filter.status, None);
        assert_eq!(filter.priority, None);
        assert_eq!(filter.search, None);
    }

    #[test]
    fn display_labels_parse() {
        let filter = params(Some("In Progress"), Some("critical"))
            .into_filter()
            .unwrap();
        assert_eq!(filter.status, Some(TicketStatus::InProgress));
        assert_eq!(filter.priority, Some(TicketPriority::Critical));
    }

    #[test]
    fn unknown_status_is_validation_error() {
        assert_matches!(
            params(Some("pending"), None).into_filter(),
            Err(CoreError::Validation(_))
        );
    }
}

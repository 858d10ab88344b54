//! Read-only analytics: the landing dashboard, growth trends and SLA
//! compliance.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use opsconsole_core::dashboard::build_summary;
use opsconsole_core::growth::{self, GrowthPoint, GrowthSummary};
use opsconsole_core::sla::{sla_report, SlaSample};
use opsconsole_core::ticket::TicketFilter;
use serde::Serialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct GrowthResponse {
    pub points: Vec<GrowthPoint>,
    pub summary: GrowthSummary,
}

/// GET /api/v1/dashboard
pub async fn dashboard(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let tickets = state.store.list_tickets(&TicketFilter::default()).await?;
    let points = state.store.growth_data().await?;

    Ok(Json(DataResponse {
        data: build_summary(&tickets, &points),
    }))
}

/// GET /api/v1/growth
pub async fn growth(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let points = state.store.growth_data().await?;
    let summary = growth::summarize(&points);

    Ok(Json(DataResponse {
        data: GrowthResponse { points, summary },
    }))
}

/// GET /api/v1/sla
pub async fn sla(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let tickets = state.store.list_tickets(&TicketFilter::default()).await?;
    let samples: Vec<SlaSample> = tickets.iter().map(|t| t.sla_sample()).collect();

    Ok(Json(DataResponse {
        data: sla_report(&samples, Utc::now()),
    }))
}

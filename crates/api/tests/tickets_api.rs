//! Integration tests for the ticket endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, TestApp};
use opsconsole_events::bus::{TICKET_CREATED, TICKET_DELETED, TICKET_UPDATED};
use serde_json::json;

async fn list_len(app: &TestApp, uri: &str) -> usize {
    let response = app.get(uri).await;
    assert_eq!(response.status(), StatusCode::OK, "{uri}");
    body_json(response).await["data"].as_array().unwrap().len()
}

#[tokio::test]
async fn list_applies_filters() {
    let app = TestApp::new();

    assert_eq!(list_len(&app, "/api/v1/tickets").await, 5);
    assert_eq!(list_len(&app, "/api/v1/tickets?status=all").await, 5);
    assert_eq!(list_len(&app, "/api/v1/tickets?status=open").await, 2);
    assert_eq!(list_len(&app, "/api/v1/tickets?status=In%20Progress").await, 2);
    assert_eq!(list_len(&app, "/api/v1/tickets?priority=high").await, 2);
    assert_eq!(list_len(&app, "/api/v1/tickets?search=VPN").await, 1);
    assert_eq!(
        list_len(&app, "/api/v1/tickets?search=backup&status=in_progress").await,
        1
    );
}

#[tokio::test]
async fn unknown_status_filter_is_400() {
    let app = TestApp::new();
    let response = app.get("/api/v1/tickets?status=pending").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn stats_count_seeded_tickets() {
    let app = TestApp::new();
    let json = body_json(app.get("/api/v1/tickets/stats").await).await;

    assert_eq!(
        json["data"],
        json!({
            "total": 5,
            "open": 2,
            "in_progress": 2,
            "resolved": 1,
            "closed": 0,
            "critical": 1,
        })
    );
}

#[tokio::test]
async fn get_missing_ticket_is_404() {
    let app = TestApp::new();

    let response = app.get("/api/v1/tickets/1").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["key"], "TK-001");

    let response = app.get("/api/v1/tickets/999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await["error"],
        "ticket with id 999 not found"
    );
}

#[tokio::test]
async fn create_assigns_key_and_publishes_event() {
    let app = TestApp::new();
    let mut events = app.event_bus.subscribe();

    let response = app
        .post_json(
            "/api/v1/tickets",
            json!({
                "title": "Printer jam on floor 3",
                "created_by": "Lisa Chen",
                "priority": "high",
            }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let ticket = body_json(response).await["data"].clone();
    assert_eq!(ticket["id"], 6);
    assert_eq!(ticket["key"], "TK-006");
    assert_eq!(ticket["status"], "open");
    assert_eq!(ticket["priority"], "high");

    let event = events.try_recv().unwrap();
    assert_eq!(event.event_type, TICKET_CREATED);
    assert_eq!(event.source_entity_id, Some(6));
    assert_eq!(event.summary(), "ticket.created: TK-006 Printer jam on floor 3");
}

#[tokio::test]
async fn create_without_title_is_400() {
    let app = TestApp::new();
    let response = app
        .post_json(
            "/api/v1/tickets",
            json!({ "title": "  ", "created_by": "Lisa Chen" }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_changes_status_and_publishes_event() {
    let app = TestApp::new();
    let mut events = app.event_bus.subscribe();

    let response = app
        .put_json("/api/v1/tickets/2", json!({ "status": "resolved" }))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let ticket = body_json(response).await["data"].clone();
    assert_eq!(ticket["status"], "resolved");
    assert!(ticket["resolved_at"].is_string());
    assert_eq!(ticket["title"], "Email service intermittent issues");

    assert_eq!(events.try_recv().unwrap().event_type, TICKET_UPDATED);

    let response = app
        .put_json("/api/v1/tickets/999", json!({ "status": "closed" }))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_removes_ticket() {
    let app = TestApp::new();
    let mut events = app.event_bus.subscribe();

    let response = app.delete("/api/v1/tickets/4").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(events.try_recv().unwrap().event_type, TICKET_DELETED);

    assert_eq!(
        app.get("/api/v1/tickets/4").await.status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(
        app.delete("/api/v1/tickets/4").await.status(),
        StatusCode::NOT_FOUND
    );
    assert_eq!(list_len(&app, "/api/v1/tickets").await, 4);
}

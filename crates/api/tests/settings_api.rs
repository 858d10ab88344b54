//! Integration tests for settings, profile, password scoring and the
//! analytics views.

mod common;

use axum::http::StatusCode;
use common::{body_json, TestApp};
use serde_json::json;

#[tokio::test]
async fn settings_default_then_replace() {
    let app = TestApp::new();

    let json = body_json(app.get("/api/v1/settings").await).await;
    let mut settings = json["data"].clone();
    assert_eq!(settings["notifications"]["email"], true);
    assert_eq!(settings["security"]["session_timeout_minutes"], 30);
    assert_eq!(settings["appearance"]["theme"], "system");
    assert_eq!(settings["integrations"]["slack"], false);

    settings["appearance"]["theme"] = json!("dark");
    settings["integrations"]["slack"] = json!(true);
    settings["integrations"]["slack_webhook_url"] = json!("https://hooks.slack.com/services/T0/B0/x");

    let response = app.put_json("/api/v1/settings", settings).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(app.get("/api/v1/settings").await).await;
    assert_eq!(json["data"]["appearance"]["theme"], "dark");
    assert_eq!(json["data"]["integrations"]["slack"], true);
}

#[tokio::test]
async fn invalid_settings_are_rejected() {
    let app = TestApp::new();

    for body in [
        json!({ "security": { "session_timeout_minutes": 45 } }),
        json!({ "appearance": { "theme": "neon" } }),
        json!({ "integrations": { "teams": true, "teams_webhook_url": "ftp://example.com" } }),
    ] {
        let response = app.put_json("/api/v1/settings", body.clone()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }

    let json = body_json(app.get("/api/v1/settings").await).await;
    assert_eq!(json["data"]["appearance"]["theme"], "system");
}

#[tokio::test]
async fn profile_round_trip_and_validation() {
    let app = TestApp::new();

    let json = body_json(app.get("/api/v1/profile").await).await;
    let mut profile = json["data"].clone();
    assert_eq!(profile["name"], "John Doe");

    profile["department"] = json!("Service Desk");
    let response = app.put_json("/api/v1/profile", profile.clone()).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["department"], "Service Desk");

    profile["email"] = json!("nope");
    let response = app.put_json("/api/v1/profile", profile).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn password_strength_scores() {
    let app = TestApp::new();

    let json = body_json(
        app.post_json(
            "/api/v1/auth/password-strength",
            json!({ "password": "Sup3r$ecret" }),
        )
        .await,
    )
    .await;
    assert_eq!(json["data"]["score"], 5);
    assert_eq!(json["data"]["label"], "Strong");
    assert!(json["data"]["suggestions"].as_array().unwrap().is_empty());

    let json = body_json(
        app.post_json("/api/v1/auth/password-strength", json!({ "password": "abc" }))
            .await,
    )
    .await;
    assert_eq!(json["data"]["score"], 1);
    assert_eq!(json["data"]["label"], "Weak");
}

#[tokio::test]
async fn dashboard_summarises_tickets_and_growth() {
    let app = TestApp::new();
    let json = body_json(app.get("/api/v1/dashboard").await).await;
    let data = &json["data"];

    assert_eq!(data["stats"]["total"], 5);
    assert_eq!(data["recent_tickets"].as_array().unwrap().len(), 3);
    let chart = data["chart"].as_array().unwrap();
    assert_eq!(chart.len(), 4);
    assert_eq!(chart[0]["month"], "Mar");
    assert_eq!(chart[3]["month"], "Jun");
}

#[tokio::test]
async fn growth_includes_summary() {
    let app = TestApp::new();
    let json = body_json(app.get("/api/v1/growth").await).await;
    let data = &json["data"];

    assert_eq!(data["points"].as_array().unwrap().len(), 6);
    assert_eq!(data["summary"]["total_tickets"], 300);
    assert_eq!(data["summary"]["total_resolved"], 284);
    assert_eq!(data["summary"]["resolution_rate_pct"], 95);
}

#[tokio::test]
async fn sla_reports_compliance() {
    let app = TestApp::new();
    let json = body_json(app.get("/api/v1/sla").await).await;
    let data = &json["data"];

    assert_eq!(data["resolved_count"], 1);
    assert_eq!(data["compliance_pct"], 100.0);
    assert_eq!(data["compliance_target_pct"], 95.0);
    assert_eq!(data["meets_target"], true);
    assert_eq!(data["targets"].as_array().unwrap().len(), 4);
}

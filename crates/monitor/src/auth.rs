//! Auth-backend webhook handling.

use opsconsole_cloud::AlertPublisher;
use opsconsole_core::alert::{Alert, AlertTopic};
use opsconsole_core::security::{severity_for, AuthEvent};
use serde::Serialize;

use crate::error::MonitorError;

/// Headline carried in every security alert body.
pub const SECURITY_ALERT_HEADLINE: &str = "Security Event Detected";

/// Result of processing one auth event.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthOutcome {
    pub event_type: String,
    pub suspicious: bool,
    pub alerted: bool,
}

/// Decode a raw webhook body.
pub fn parse_auth_event(body: &[u8]) -> Result<AuthEvent, MonitorError> {
    Ok(serde_json::from_slice(body)?)
}

/// Build the security alert for a suspicious event.
pub fn security_alert(event: &AuthEvent) -> Alert {
    let severity = severity_for(&event.event_type);
    Alert::new(
        AlertTopic::Security,
        format!("Security Alert: {}", event.event_type),
        serde_json::json!({
            "alert": SECURITY_ALERT_HEADLINE,
            "type": event.event_type,
            "userId": event.user_id,
            "timestamp": event.timestamp,
            "severity": severity,
        }),
        severity,
    )
}

/// Alert on suspicious event types, then log the event.
///
/// A failed publish is returned to the caller; the event is not logged as
/// processed in that case.
pub async fn process_auth_event(
    event: &AuthEvent,
    alerts: &dyn AlertPublisher,
) -> Result<AuthOutcome, MonitorError> {
    let suspicious = event.is_suspicious();
    if suspicious {
        alerts.publish(&security_alert(event)).await?;
    }

    tracing::info!(
        event_type = %event.event_type,
        user_id = ?event.user_id,
        suspicious,
        "Auth event processed"
    );

    Ok(AuthOutcome {
        event_type: event.event_type.clone(),
        suspicious,
        alerted: suspicious,
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use opsconsole_cloud::memory::RecordingPublisher;
    use opsconsole_core::alert::Severity;

    use super::*;

    fn event(kind: &str) -> AuthEvent {
        parse_auth_event(
            format!(
                r#"{{"type":"{kind}","user_id":"u-42","timestamp":"2025-01-15T10:00:00Z"}}"#
            )
            .as_bytes(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn brute_force_publishes_high_alert() {
        let alerts = RecordingPublisher::new();
        let outcome = process_auth_event(&event("brute_force_attempt"), &alerts)
            .await
            .unwrap();

        assert!(outcome.alerted);
        let published = alerts.published();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].subject, "Security Alert: brute_force_attempt");
        assert_eq!(published[0].severity, Severity::High);
        assert_eq!(published[0].message["alert"], SECURITY_ALERT_HEADLINE);
        assert_eq!(published[0].message["userId"], "u-42");
        assert_eq!(published[0].message["severity"], "HIGH");
    }

    #[tokio::test]
    async fn non_string_identity_fields_pass_through() {
        let alerts = RecordingPublisher::new();
        let event = parse_auth_event(
            br#"{"type":"brute_force_attempt","user_id":42,"timestamp":1736936400}"#,
        )
        .unwrap();

        process_auth_event(&event, &alerts).await.unwrap();

        let published = alerts.published();
        assert_eq!(published[0].message["userId"], 42);
        assert_eq!(published[0].message["timestamp"], 1_736_936_400);
    }

    #[tokio::test]
    async fn routine_login_is_only_logged() {
        let alerts = RecordingPublisher::new();
        let outcome = process_auth_event(&event("login"), &alerts).await.unwrap();

        assert!(!outcome.suspicious);
        assert!(alerts.published().is_empty());
    }

    #[tokio::test]
    async fn publish_failure_propagates() {
        let alerts = RecordingPublisher::failing();
        let result = process_auth_event(&event("unusual_time_login"), &alerts).await;
        assert_matches!(result, Err(MonitorError::Cloud(_)));
    }

    #[test]
    fn malformed_body_is_invalid_event() {
        assert_matches!(
            parse_auth_event(b"not json"),
            Err(MonitorError::InvalidEvent(_))
        );
        assert_matches!(
            parse_auth_event(br#"{"user_id":"x"}"#),
            Err(MonitorError::InvalidEvent(_))
        );
    }
}

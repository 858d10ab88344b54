//! Authentication events reported by the managed auth backend.

use serde::{Deserialize, Serialize};

use crate::alert::Severity;

pub const EVENT_MULTIPLE_FAILED_LOGINS: &str = "multiple_failed_logins";
pub const EVENT_LOGIN_FROM_NEW_LOCATION: &str = "login_from_new_location";
pub const EVENT_UNUSUAL_TIME_LOGIN: &str = "unusual_time_login";
pub const EVENT_BRUTE_FORCE_ATTEMPT: &str = "brute_force_attempt";

/// Event types that trigger a security alert.
pub const SUSPICIOUS_EVENT_TYPES: &[&str] = &[
    EVENT_MULTIPLE_FAILED_LOGINS,
    EVENT_LOGIN_FROM_NEW_LOCATION,
    EVENT_UNUSUAL_TIME_LOGIN,
    EVENT_BRUTE_FORCE_ATTEMPT,
];

/// An auth event as posted by the auth backend webhook.
///
/// `user_id` and `timestamp` are carried as raw JSON: backends send them as
/// strings or numbers, and both are copied into the alert unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub user_id: Option<serde_json::Value>,
    #[serde(default)]
    pub timestamp: Option<serde_json::Value>,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

impl AuthEvent {
    pub fn is_suspicious(&self) -> bool {
        is_suspicious(&self.event_type)
    }
}

pub fn is_suspicious(event_type: &str) -> bool {
    SUSPICIOUS_EVENT_TYPES.contains(&event_type)
}

/// Unknown event types default to medium.
pub fn severity_for(event_type: &str) -> Severity {
    match event_type {
        EVENT_BRUTE_FORCE_ATTEMPT => Severity::High,
        EVENT_MULTIPLE_FAILED_LOGINS => Severity::Medium,
        EVENT_LOGIN_FROM_NEW_LOCATION | EVENT_UNUSUAL_TIME_LOGIN => Severity::Low,
        _ => Severity::Medium,
    }
}

//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is shared via `Arc<EventBus>` between request handlers (which
//! publish ticket and alert events) and the notification router (which
//! forwards them to webhooks and email).

use chrono::{DateTime, Utc};
use opsconsole_core::alert::Alert;
use opsconsole_core::types::DbId;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Event names published by the console.
pub const TICKET_CREATED: &str = "ticket.created";
pub const TICKET_UPDATED: &str = "ticket.updated";
pub const TICKET_DELETED: &str = "ticket.deleted";

/// Prefix shared by every monitoring alert event (`alert.health`, ...).
pub const ALERT_PREFIX: &str = "alert.";

// ---------------------------------------------------------------------------
// PlatformEvent
// ---------------------------------------------------------------------------

/// Something that happened in the console.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformEvent {
    /// Dot-separated event name, e.g. `"ticket.created"`.
    pub event_type: String,

    /// Optional source entity kind (e.g. `"ticket"`).
    pub source_entity_type: Option<String>,

    /// Optional source entity id.
    pub source_entity_id: Option<DbId>,

    /// Event-specific JSON data.
    pub payload: serde_json::Value,

    pub timestamp: DateTime<Utc>,
}

impl PlatformEvent {
    /// Create an event with an empty object payload and no source.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            source_entity_type: None,
            source_entity_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    /// Wrap a monitoring alert as an `alert.<topic>` event.
    pub fn from_alert(alert: &Alert) -> Self {
        Self::new(alert.event_type()).with_payload(serde_json::json!({
            "subject": alert.subject,
            "severity": alert.severity,
            "message": alert.message,
        }))
    }

    pub fn with_source(mut self, entity_type: impl Into<String>, entity_id: DbId) -> Self {
        self.source_entity_type = Some(entity_type.into());
        self.source_entity_id = Some(entity_id);
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }

    pub fn is_alert(&self) -> bool {
        self.event_type.starts_with(ALERT_PREFIX)
    }

    /// One-line human summary used as chat message text and email subject.
    ///
    /// Alerts use their subject (with severity when known); ticket events
    /// use the display key and title.
    pub fn summary(&self) -> String {
        let str_field = |name: &str| self.payload.get(name).and_then(|v| v.as_str());

        if let Some(subject) = str_field("subject") {
            return match str_field("severity") {
                Some(severity) => format!("[{severity}] {subject}"),
                None => subject.to_string(),
            };
        }

        match (str_field("key"), str_field("title")) {
            (Some(key), Some(title)) => format!("{}: {key} {title}", self.event_type),
            (None, Some(title)) => format!("{}: {title}", self.event_type),
            _ => self.event_type.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// ```rust
/// use opsconsole_events::bus::{EventBus, PlatformEvent};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(PlatformEvent::new("ticket.created"));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<PlatformEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest un-consumed messages are dropped
    /// and slow receivers observe `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// With no active subscribers the event is silently dropped.
    pub fn publish(&self, event: PlatformEvent) {
        // SendError only means there are zero receivers.
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PlatformEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

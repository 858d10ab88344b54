use std::sync::Arc;

use opsconsole_cloud::AlertPublisher;
use opsconsole_db::ConsoleStore;
use opsconsole_events::EventBus;
use opsconsole_genai::TextGenerator;

use crate::background::monitor::MonitoringStatus;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Tickets, users, chat history, analytics and preferences.
    pub store: Arc<dyn ConsoleStore>,
    /// Language model behind the chat endpoint.
    pub generator: Arc<dyn TextGenerator>,
    pub config: Arc<ServerConfig>,
    /// Centralized event bus for ticket and alert events.
    pub event_bus: Arc<EventBus>,
    /// Destination for security alerts raised by auth-event webhooks.
    pub alerts: Arc<dyn AlertPublisher>,
    /// Latest reports from the in-process monitoring jobs.
    pub monitoring: Arc<MonitoringStatus>,
}

//! Event-to-notification routing engine.
//!
//! [`NotificationRouter`] subscribes to the platform event bus and forwards
//! alerts and newly created tickets to the chat webhooks and operator email
//! enabled in the console settings.

use std::sync::Arc;

use opsconsole_core::settings::ConsoleSettings;
use opsconsole_db::ConsoleStore;
use opsconsole_events::bus::TICKET_CREATED;
use opsconsole_events::{EmailDelivery, PlatformEvent, WebhookDelivery};
use tokio::sync::broadcast;

/// Routes platform events to external notification channels.
///
/// Settings are re-read for every event so toggles made through
/// `PUT /api/v1/settings` apply without a restart.
pub struct NotificationRouter {
    store: Arc<dyn ConsoleStore>,
    webhooks: WebhookDelivery,
    email: Option<EmailDelivery>,
}

impl NotificationRouter {
    pub fn new(
        store: Arc<dyn ConsoleStore>,
        webhooks: WebhookDelivery,
        email: Option<EmailDelivery>,
    ) -> Self {
        Self {
            store,
            webhooks,
            email,
        }
    }

    /// Whether an event type is forwarded at all.
    pub fn is_routed(event: &PlatformEvent) -> bool {
        event.is_alert() || event.event_type == TICKET_CREATED
    }

    /// Run the main routing loop.
    ///
    /// The loop exits when the channel is closed (i.e. the
    /// [`EventBus`](opsconsole_events::EventBus) is dropped).
    pub async fn run(self, mut receiver: broadcast::Receiver<PlatformEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if !Self::is_routed(&event) {
                        continue;
                    }
                    if let Err(e) = self.route_event(&event).await {
                        tracing::error!(
                            error = %e,
                            event_type = %event.event_type,
                            "Failed to route event"
                        );
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Notification router lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, notification router shutting down");
                    break;
                }
            }
        }
    }

    /// Deliver one event through every enabled channel.
    ///
    /// Individual delivery failures are logged; only a failure to load the
    /// settings is returned.
    async fn route_event(&self, event: &PlatformEvent) -> Result<(), opsconsole_db::StoreError> {
        let settings = self.store.get_settings().await?;

        for url in settings.integrations.active_webhooks() {
            match self.webhooks.deliver(url, event).await {
                Ok(()) => tracing::debug!(event_type = %event.event_type, "Webhook delivered"),
                Err(e) => tracing::warn!(
                    error = %e,
                    event_type = %event.event_type,
                    "Webhook delivery failed"
                ),
            }
        }

        if let (Some(email), Some(to)) = (&self.email, email_recipient(&settings)) {
            if let Err(e) = email.deliver(to, event).await {
                tracing::warn!(
                    error = %e,
                    event_type = %event.event_type,
                    "Email delivery failed"
                );
            }
        }

        Ok(())
    }
}

/// The operator address, when email notifications and system alerts are both on.
fn email_recipient(settings: &ConsoleSettings) -> Option<&str> {
    let n = &settings.notifications;
    if !(n.email && n.system_alerts) {
        return None;
    }
    n.email_address.as_deref().filter(|a| !a.trim().is_empty())
}

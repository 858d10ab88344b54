//! Alert fan-out: every alert raised in-process lands on the event bus
//! before it is forwarded to the cloud topic.

use std::sync::Arc;

use async_trait::async_trait;
use opsconsole_cloud::{AlertPublisher, CloudError};
use opsconsole_core::alert::Alert;
use opsconsole_events::{EventBus, PlatformEvent};

/// [`AlertPublisher`] that emits an `alert.<topic>` event, then hands the
/// alert to the upstream publisher when one is configured.
pub struct BusAlertPublisher {
    bus: Arc<EventBus>,
    upstream: Option<Arc<dyn AlertPublisher>>,
}

impl BusAlertPublisher {
    pub fn new(bus: Arc<EventBus>, upstream: Option<Arc<dyn AlertPublisher>>) -> Self {
        Self { bus, upstream }
    }
}

#[async_trait]
impl AlertPublisher for BusAlertPublisher {
    async fn publish(&self, alert: &Alert) -> Result<(), CloudError> {
        self.bus.publish(PlatformEvent::from_alert(alert));

        if let Some(upstream) = &self.upstream {
            upstream.publish(alert).await?;
        }
        Ok(())
    }
}

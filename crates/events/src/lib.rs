//! OpsConsole event bus and outbound notification channels.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`PlatformEvent`]: the envelope for ticket changes and monitoring alerts.
//! - [`delivery`]: Slack/Teams-compatible webhooks and SMTP email.

pub mod bus;
pub mod delivery;

pub use bus::{EventBus, PlatformEvent};
pub use delivery::email::{EmailConfig, EmailDelivery, EmailError};
pub use delivery::webhook::{WebhookDelivery, WebhookError};

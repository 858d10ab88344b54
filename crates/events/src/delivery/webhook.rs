//! Chat-webhook delivery with exponential-backoff retry.
//!
//! [`WebhookDelivery`] POSTs a JSON body whose `text` field is understood by
//! Slack and Microsoft Teams incoming webhooks; the structured event rides
//! along for generic receivers.

use std::time::Duration;

use crate::bus::PlatformEvent;

/// Retry delays in seconds (exponential backoff: 1s, 2s, 4s).
const RETRY_DELAYS_SECS: [u64; 3] = [1, 2, 4];

/// HTTP request timeout for a single delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    /// The underlying HTTP request failed (network, DNS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote server returned a non-2xx status code.
    #[error("Webhook returned HTTP {0}")]
    HttpStatus(u16),
}

// ---------------------------------------------------------------------------
// WebhookDelivery
// ---------------------------------------------------------------------------

/// Delivers events to Slack, Teams or generic webhook endpoints.
pub struct WebhookDelivery {
    client: reqwest::Client,
    retry_delays: Vec<Duration>,
}

impl WebhookDelivery {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            retry_delays: RETRY_DELAYS_SECS
                .iter()
                .map(|s| Duration::from_secs(*s))
                .collect(),
        }
    }

    /// Replace the backoff schedule; one retry per entry.
    pub fn with_retry_delays(mut self, delays: Vec<Duration>) -> Self {
        self.retry_delays = delays;
        self
    }

    /// Build the JSON body sent for `event`.
    pub fn payload(event: &PlatformEvent) -> serde_json::Value {
        serde_json::json!({
            "text": event.summary(),
            "event_type": event.event_type,
            "payload": event.payload,
            "timestamp": event.timestamp,
            "source_entity_type": event.source_entity_type,
            "source_entity_id": event.source_entity_id,
        })
    }

    /// Deliver an event to a webhook URL, retrying on failure.
    ///
    /// Returns `Ok(())` on the first successful attempt, otherwise the error
    /// of the first failed attempt.
    pub async fn deliver(&self, url: &str, event: &PlatformEvent) -> Result<(), WebhookError> {
        let payload = Self::payload(event);
        let mut first_err: Option<WebhookError> = None;

        for (attempt, delay) in self.retry_delays.iter().enumerate() {
            match self.try_send(url, &payload).await {
                Ok(()) => return Ok(()),
                Err(e) => {
                    tracing::warn!(
                        attempt = attempt + 1,
                        url,
                        error = %e,
                        "Webhook delivery attempt failed, retrying"
                    );
                    first_err.get_or_insert(e);
                    tokio::time::sleep(*delay).await;
                }
            }
        }

        // Final attempt after the last backoff.
        match self.try_send(url, &payload).await {
            Ok(()) => Ok(()),
            Err(e) => {
                tracing::error!(url, error = %e, "Webhook delivery failed after all retries");
                Err(first_err.unwrap_or(e))
            }
        }
    }

    async fn try_send(&self, url: &str, payload: &serde_json::Value) -> Result<(), WebhookError> {
        let response = self.client.post(url).json(payload).send().await?;
        if !response.status().is_success() {
            return Err(WebhookError::HttpStatus(response.status().as_u16()));
        }
        Ok(())
    }
}

impl Default for WebhookDelivery {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use axum::extract::State;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    use super::*;

    /// Mock endpoint that fails with 503 `failures` times, then records bodies.
    async fn spawn_flaky(failures: usize) -> (String, Arc<AtomicUsize>, Arc<tokio::sync::Mutex<Vec<Value>>>) {
        let hits = Arc::new(AtomicUsize::new(0));
        let bodies = Arc::new(tokio::sync::Mutex::new(Vec::new()));

        let state = (Arc::clone(&hits), Arc::clone(&bodies));
        let router = Router::new()
            .route(
                "/hook",
                post(
                    move |State((hits, bodies)): State<(
                        Arc<AtomicUsize>,
                        Arc<tokio::sync::Mutex<Vec<Value>>>,
                    )>,
                          Json(body): Json<Value>| async move {
                        let n = hits.fetch_add(1, Ordering::SeqCst);
                        if n < failures {
                            return StatusCode::SERVICE_UNAVAILABLE;
                        }
                        bodies.lock().await.push(body);
                        StatusCode::OK
                    },
                ),
            )
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        (format!("http://{addr}/hook"), hits, bodies)
    }

    fn fast() -> WebhookDelivery {
        WebhookDelivery::new().with_retry_delays(vec![Duration::ZERO; 3])
    }

    #[test]
    fn payload_has_chat_text() {
        let event = crate::PlatformEvent::new("ticket.created")
            .with_source("ticket", 6)
            .with_payload(json!({"key": "TK-006", "title": "Printer offline"}));
        let body = WebhookDelivery::payload(&event);
        assert_eq!(body["text"], "ticket.created: TK-006 Printer offline");
        assert_eq!(body["source_entity_id"], 6);
    }

    #[test]
    fn webhook_error_display_http_status() {
        let err = WebhookError::HttpStatus(502);
        assert_eq!(err.to_string(), "Webhook returned HTTP 502");
    }

    #[tokio::test]
    async fn delivers_after_transient_failures() {
        let (url, hits, bodies) = spawn_flaky(2).await;
        let event = crate::PlatformEvent::new("alert.health");

        fast().deliver(&url, &event).await.unwrap();

        assert_eq!(hits.load(Ordering::SeqCst), 3);
        assert_eq!(bodies.lock().await[0]["event_type"], "alert.health");
    }

    #[tokio::test]
    async fn gives_up_after_all_retries() {
        let (url, hits, _) = spawn_flaky(usize::MAX).await;
        let event = crate::PlatformEvent::new("alert.health");

        let err = fast().deliver(&url, &event).await.unwrap_err();

        assert!(matches!(err, WebhookError::HttpStatus(503)));
        assert_eq!(hits.load(Ordering::SeqCst), 4);
    }
}

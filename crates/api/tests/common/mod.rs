#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use opsconsole_api::alerts::BusAlertPublisher;
use opsconsole_api::background::monitor::MonitoringStatus;
use opsconsole_api::config::ServerConfig;
use opsconsole_api::router::build_app_router;
use opsconsole_api::state::AppState;
use opsconsole_cloud::memory::RecordingPublisher;
use opsconsole_cloud::AlertPublisher;
use opsconsole_db::MemoryStore;
use opsconsole_events::EventBus;
use opsconsole_genai::{GenAiError, TextGenerator};
use tower::ServiceExt;

/// Reply returned by [`FakeGenerator::replying`] unless overridden.
pub const CANNED_REPLY: &str = "Restart the DHCP service and renew the lease.";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        auth_webhook_secret: None,
        monitor_interval_secs: 300,
    }
}

// ---------------------------------------------------------------------------
// Fake text generator
// ---------------------------------------------------------------------------

/// Records every prompt and answers with a fixed reply, or fails.
pub struct FakeGenerator {
    reply: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl FakeGenerator {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            prompts: Mutex::default(),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            prompts: Mutex::default(),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenAiError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply.clone().ok_or(GenAiError::EmptyResponse)
    }
}

// ---------------------------------------------------------------------------
// Test application
// ---------------------------------------------------------------------------

/// The full router over the seeded in-memory store, with handles on the
/// collaborators tests inspect.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub generator: Arc<FakeGenerator>,
    /// Alerts forwarded past the event bus.
    pub upstream_alerts: Arc<RecordingPublisher>,
    pub event_bus: Arc<EventBus>,
}

pub struct TestAppBuilder {
    config: ServerConfig,
    generator: FakeGenerator,
    upstream: RecordingPublisher,
}

impl TestAppBuilder {
    pub fn with_webhook_secret(mut self, secret: &str) -> Self {
        self.config.auth_webhook_secret = Some(secret.to_string());
        self
    }

    pub fn with_generator(mut self, generator: FakeGenerator) -> Self {
        self.generator = generator;
        self
    }

    pub fn with_failing_alerts(mut self) -> Self {
        self.upstream = RecordingPublisher::failing();
        self
    }

    pub fn build(self) -> TestApp {
        let store = Arc::new(MemoryStore::seeded());
        let generator = Arc::new(self.generator);
        let upstream_alerts = Arc::new(self.upstream);
        let event_bus = Arc::new(EventBus::default());

        let upstream: Arc<dyn AlertPublisher> = upstream_alerts.clone();
        let alerts: Arc<dyn AlertPublisher> = Arc::new(BusAlertPublisher::new(
            Arc::clone(&event_bus),
            Some(upstream),
        ));

        let state = AppState {
            store: store.clone(),
            generator: generator.clone(),
            config: Arc::new(self.config.clone()),
            event_bus: Arc::clone(&event_bus),
            alerts,
            monitoring: Arc::new(MonitoringStatus::disabled()),
        };

        TestApp {
            router: build_app_router(state, &self.config),
            store,
            generator,
            upstream_alerts,
            event_bus,
        }
    }
}

impl TestApp {
    pub fn builder() -> TestAppBuilder {
        TestAppBuilder {
            config: test_config(),
            generator: FakeGenerator::replying(CANNED_REPLY),
            upstream: RecordingPublisher::new(),
        }
    }

    pub fn new() -> Self {
        Self::builder().build()
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post_json(&self, uri: &str, body: serde_json::Value) -> Response<Body> {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn put_json(&self, uri: &str, body: serde_json::Value) -> Response<Body> {
        self.send(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> Response<Body> {
        self.send(Method::DELETE, uri, None).await
    }

    pub async fn request(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> Response<Body> {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.request(request).await
    }
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

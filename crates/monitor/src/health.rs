//! Service health probing.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use opsconsole_cloud::{AlertPublisher, HealthMetrics};
use opsconsole_core::alert::{Alert, AlertTopic};
use opsconsole_core::health::{determine_overall_health, OverallStatus, ServiceCheck};
use reqwest::Method;
use serde::Serialize;

use crate::config::MonitorConfig;
use crate::error::MonitorError;

pub const SERVICE_APPLICATION: &str = "application";
pub const SERVICE_DATABASE: &str = "database";
pub const SERVICE_AI_API: &str = "ai-api";
pub const SERVICE_GOOGLE_AI: &str = "google-ai";
pub const SERVICE_SUPABASE: &str = "supabase";

/// Body sent to the chat endpoint when probing it.
const CHAT_PROBE_MESSAGE: &str = "health check";

/// What counts as a healthy answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    /// Exactly 200.
    Ok,
    /// Anything below 500; the service is up even if it rejects us.
    NotServerError,
}

impl Expect {
    fn is_healthy(self, status: u16) -> bool {
        match self {
            Self::Ok => status == 200,
            Self::NotServerError => status < 500,
        }
    }
}

/// One HTTP probe.
#[derive(Debug, Clone)]
struct Probe {
    service: &'static str,
    /// `Err` names the missing setting.
    url: Result<String, &'static str>,
    method: Method,
    headers: Vec<(&'static str, String)>,
    body: Option<serde_json::Value>,
    expect: Expect,
    /// Keep the response body as the check's details.
    capture_body: bool,
}

impl Probe {
    fn get(service: &'static str, url: Result<String, &'static str>, expect: Expect) -> Self {
        Self {
            service,
            url,
            method: Method::GET,
            headers: Vec::new(),
            body: None,
            expect,
            capture_body: false,
        }
    }
}

/// Outcome of one health-check run.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: OverallStatus,
    pub message: String,
    pub checks: Vec<ServiceCheck>,
    pub timestamp: DateTime<Utc>,
    /// Whether a health alert was published for this run.
    pub alerted: bool,
}

/// Probes every configured service and reports on the aggregate.
pub struct HealthMonitor {
    client: reqwest::Client,
    config: MonitorConfig,
    alerts: Arc<dyn AlertPublisher>,
    metrics: Arc<dyn HealthMetrics>,
}

impl HealthMonitor {
    pub fn new(
        config: MonitorConfig,
        alerts: Arc<dyn AlertPublisher>,
        metrics: Arc<dyn HealthMetrics>,
    ) -> Result<Self, MonitorError> {
        let client = reqwest::Client::builder()
            .timeout(config.probe_timeout)
            .build()?;
        Ok(Self {
            client,
            config,
            alerts,
            metrics,
        })
    }

    fn probes(&self) -> Vec<Probe> {
        let app = self.config.app_url.clone().ok_or("APP_URL");
        let supabase = self.config.supabase_url.clone().ok_or("SUPABASE_URL");

        let mut database = Probe::get(
            SERVICE_DATABASE,
            supabase.clone().map(|u| format!("{u}/rest/v1/")),
            Expect::Ok,
        );
        if let Some(key) = &self.config.supabase_anon_key {
            database.headers.push(("apikey", key.clone()));
        }

        let mut application = Probe::get(
            SERVICE_APPLICATION,
            app.clone().map(|u| format!("{u}/health")),
            Expect::Ok,
        );
        application.capture_body = true;

        let ai_api = Probe {
            method: Method::POST,
            body: Some(serde_json::json!({ "message": CHAT_PROBE_MESSAGE })),
            ..Probe::get(
                SERVICE_AI_API,
                app.map(|u| format!("{u}/api/v1/chat")),
                Expect::NotServerError,
            )
        };

        vec![
            application,
            database,
            ai_api,
            Probe::get(
                SERVICE_GOOGLE_AI,
                Ok(self.config.google_ai_url.clone()),
                Expect::NotServerError,
            ),
            Probe::get(SERVICE_SUPABASE, supabase, Expect::NotServerError),
        ]
    }

    async fn run_probe(&self, probe: Probe) -> ServiceCheck {
        let url = match probe.url {
            Ok(url) => url,
            Err(setting) => {
                return ServiceCheck::failed(probe.service, format!("{setting} is not set"))
            }
        };

        let mut request = self.client.request(probe.method, &url);
        for (name, value) in &probe.headers {
            request = request.header(*name, value);
        }
        if let Some(body) = &probe.body {
            request = request.json(body);
        }

        let started = Instant::now();
        match request.send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                let details = if probe.capture_body {
                    response.text().await.ok()
                } else {
                    None
                };
                let elapsed_ms = started.elapsed().as_millis() as u64;

                let mut check =
                    ServiceCheck::responded(probe.service, probe.expect.is_healthy(status), elapsed_ms);
                if let Some(details) = details {
                    check = check.with_details(details);
                }
                check
            }
            Err(e) if e.is_timeout() => ServiceCheck::failed(probe.service, "Request timeout"),
            Err(e) => ServiceCheck::failed(probe.service, e.to_string()),
        }
    }

    /// Probe every service concurrently, then alert and record gauges.
    ///
    /// Alert and metric failures are logged; they do not fail the run.
    pub async fn run_health_check(&self) -> HealthReport {
        let checks: Vec<ServiceCheck> =
            futures::future::join_all(self.probes().into_iter().map(|p| self.run_probe(p))).await;

        let overall = determine_overall_health(&checks);
        let mut alerted = false;

        if overall.status != OverallStatus::Healthy {
            let subject = format!(
                "System Health Alert: {}",
                overall.status.as_str().to_uppercase()
            );
            let message = serde_json::to_value(&overall).unwrap_or_default();
            let alert = Alert::new(AlertTopic::Health, subject, message, overall.status.severity());

            match self.alerts.publish(&alert).await {
                Ok(()) => alerted = true,
                Err(e) => tracing::error!(error = %e, "Failed to publish health alert"),
            }
        }

        if let Err(e) = self.metrics.put_service_health(&checks).await {
            tracing::error!(error = %e, "Failed to publish service health metrics");
        }

        tracing::info!(
            status = overall.status.as_str(),
            unhealthy = overall.issues.len(),
            "Health check completed"
        );

        HealthReport {
            status: overall.status,
            message: overall.message,
            checks,
            timestamp: Utc::now(),
            alerted,
        }
    }
}

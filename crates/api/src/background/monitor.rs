//! In-process monitoring: the health and performance jobs run on the API's
//! own runtime and their latest reports are served by
//! `GET /api/v1/monitoring/status`.

use std::sync::Arc;
use std::time::Duration;

use opsconsole_monitor::schedule::run_every;
use opsconsole_monitor::{HealthMonitor, HealthReport, PerformanceMonitor, PerformanceReport};
use serde::Serialize;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Latest monitoring reports, shared between the jobs and the handlers.
#[derive(Debug, Default)]
pub struct MonitoringStatus {
    enabled: bool,
    health: RwLock<Option<HealthReport>>,
    performance: RwLock<Option<PerformanceReport>>,
}

/// What the status endpoint returns.
#[derive(Debug, Clone, Serialize)]
pub struct MonitoringSnapshot {
    pub enabled: bool,
    pub health: Option<HealthReport>,
    pub performance: Option<PerformanceReport>,
}

impl MonitoringStatus {
    /// Monitoring is not configured; the snapshot stays empty.
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub async fn record_health(&self, report: HealthReport) {
        *self.health.write().await = Some(report);
    }

    pub async fn record_performance(&self, report: PerformanceReport) {
        *self.performance.write().await = Some(report);
    }

    pub async fn snapshot(&self) -> MonitoringSnapshot {
        MonitoringSnapshot {
            enabled: self.enabled,
            health: self.health.read().await.clone(),
            performance: self.performance.read().await.clone(),
        }
    }
}

/// Spawn the monitoring jobs. The performance job only runs when a
/// [`PerformanceMonitor`] is supplied.
pub fn spawn(
    health: Arc<HealthMonitor>,
    performance: Option<Arc<PerformanceMonitor>>,
    status: Arc<MonitoringStatus>,
    period: Duration,
    cancel: CancellationToken,
) -> Vec<JoinHandle<()>> {
    let mut handles = Vec::with_capacity(2);

    let health_status = Arc::clone(&status);
    handles.push(tokio::spawn(run_every(
        "health",
        period,
        cancel.clone(),
        move || {
            let health = Arc::clone(&health);
            let status = Arc::clone(&health_status);
            async move {
                let report = health.run_health_check().await;
                status.record_health(report).await;
            }
        },
    )));

    if let Some(performance) = performance {
        handles.push(tokio::spawn(run_every(
            "performance",
            period,
            cancel,
            move || {
                let performance = Arc::clone(&performance);
                let status = Arc::clone(&status);
                async move {
                    let report = performance.run_performance_monitor().await;
                    status.record_performance(report).await;
                }
            },
        )));
    }

    tracing::info!(
        jobs = handles.len(),
        interval_secs = period.as_secs(),
        "Monitoring jobs started"
    );

    handles
}

#[cfg(test)]
mod tests {
    use opsconsole_cloud::memory::{RecordingPublisher, StaticMetrics};
    use opsconsole_core::health::OverallStatus;
    use opsconsole_monitor::MonitorConfig;

    use super::*;

    #[tokio::test]
    async fn disabled_snapshot_is_empty() {
        let snapshot = MonitoringStatus::disabled().snapshot().await;
        assert!(!snapshot.enabled);
        assert!(snapshot.health.is_none());
        assert!(snapshot.performance.is_none());
    }

    #[tokio::test]
    async fn first_health_run_is_recorded_immediately() {
        let metrics = Arc::new(StaticMetrics::new());
        let health = Arc::new(
            HealthMonitor::new(
                MonitorConfig {
                    google_ai_url: "http://127.0.0.1:9".into(),
                    ..MonitorConfig::default()
                },
                Arc::new(RecordingPublisher::new()),
                metrics,
            )
            .unwrap(),
        );
        let status = Arc::new(MonitoringStatus::enabled());
        let cancel = CancellationToken::new();

        let handles = spawn(
            health,
            None,
            Arc::clone(&status),
            Duration::from_secs(3600),
            cancel.clone(),
        );
        assert_eq!(handles.len(), 1);

        let mut recorded = None;
        for _ in 0..500 {
            if let Some(report) = status.snapshot().await.health {
                recorded = Some(report);
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }

        cancel.cancel();
        for handle in handles {
            handle.await.unwrap();
        }

        let report = recorded.expect("health report recorded");
        assert_eq!(report.status, OverallStatus::Unhealthy);
        assert!(status.snapshot().await.performance.is_none());
    }
}

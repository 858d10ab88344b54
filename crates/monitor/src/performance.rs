//! Load-balancer performance polling.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use opsconsole_cloud::metrics::PERFORMANCE_QUERIES;
use opsconsole_cloud::{AlertPublisher, MetricArchive, MetricSource};
use opsconsole_core::alert::{Alert, AlertTopic};
use opsconsole_core::performance::{detect_anomalies, Anomaly, MetricSeries};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReport {
    /// Number of series collected (failed queries count, with no points).
    pub metrics_collected: usize,
    pub anomalies: Vec<Anomaly>,
    pub timestamp: DateTime<Utc>,
}

impl PerformanceReport {
    pub fn anomalies_detected(&self) -> usize {
        self.anomalies.len()
    }
}

pub struct PerformanceMonitor {
    source: Arc<dyn MetricSource>,
    alerts: Arc<dyn AlertPublisher>,
    archive: Option<Arc<dyn MetricArchive>>,
}

impl PerformanceMonitor {
    pub fn new(
        source: Arc<dyn MetricSource>,
        alerts: Arc<dyn AlertPublisher>,
        archive: Option<Arc<dyn MetricArchive>>,
    ) -> Self {
        Self {
            source,
            alerts,
            archive,
        }
    }

    /// Fetch every performance series. A failed query yields an empty series.
    pub async fn collect(&self) -> MetricSeries {
        let mut metrics = MetricSeries::new();
        for query in &PERFORMANCE_QUERIES {
            let points = match self.source.statistics(query).await {
                Ok(points) => points,
                Err(e) => {
                    tracing::error!(metric = query.name, error = %e, "Failed to get metric");
                    Vec::new()
                }
            };
            metrics.insert(query.name.to_string(), points);
        }
        metrics
    }

    /// Collect, detect, alert once per anomaly, then archive the snapshot.
    pub async fn run_performance_monitor(&self) -> PerformanceReport {
        let metrics = self.collect().await;
        let anomalies = detect_anomalies(&metrics);

        for anomaly in &anomalies {
            let alert = Alert::new(
                AlertTopic::Performance,
                format!("Performance Alert: {}", anomaly.kind),
                serde_json::to_value(anomaly).unwrap_or_default(),
                anomaly.severity,
            );
            if let Err(e) = self.alerts.publish(&alert).await {
                tracing::error!(anomaly = %anomaly.kind, error = %e, "Failed to publish performance alert");
            }
        }

        let now = Utc::now();
        if let Some(archive) = &self.archive {
            if let Err(e) = archive.archive(&metrics, now).await {
                tracing::error!(error = %e, "Failed to archive metrics");
            }
        }

        tracing::info!(
            metrics_collected = metrics.len(),
            anomalies_detected = anomalies.len(),
            "Performance monitoring completed"
        );

        PerformanceReport {
            metrics_collected: metrics.len(),
            anomalies,
            timestamp: now,
        }
    }
}

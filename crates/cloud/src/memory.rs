//! In-process implementations of the cloud traits.
//!
//! They record what they were asked to do, which makes them usable as test
//! doubles for the monitoring jobs and the API.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use opsconsole_core::alert::Alert;
use opsconsole_core::health::ServiceCheck;
use opsconsole_core::performance::{Datapoint, MetricSeries};

use crate::alerts::AlertPublisher;
use crate::archive::MetricArchive;
use crate::error::CloudError;
use crate::metrics::{HealthMetrics, MetricQuery, MetricSource};

/// Keeps every published alert. Optionally fails every call.
#[derive(Debug, Default)]
pub struct RecordingPublisher {
    alerts: Mutex<Vec<Alert>>,
    fail: bool,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// A publisher whose every call returns a service error.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn published(&self) -> Vec<Alert> {
        self.alerts.lock().map(|a| a.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl AlertPublisher for RecordingPublisher {
    async fn publish(&self, alert: &Alert) -> Result<(), CloudError> {
        if self.fail {
            return Err(CloudError::Service {
                service: "memory",
                message: "publisher configured to fail".into(),
            });
        }
        if let Ok(mut alerts) = self.alerts.lock() {
            alerts.push(alert.clone());
        }
        Ok(())
    }
}

/// Serves fixed datapoints keyed by [`MetricQuery::name`]; records health
/// gauges. Names listed in `failing` return an error.
#[derive(Debug, Default)]
pub struct StaticMetrics {
    series: HashMap<String, Vec<Datapoint>>,
    failing: Vec<String>,
    health: Mutex<Vec<ServiceCheck>>,
}

impl StaticMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(mut self, name: &str, points: Vec<Datapoint>) -> Self {
        self.series.insert(name.to_string(), points);
        self
    }

    pub fn with_failure(mut self, name: &str) -> Self {
        self.failing.push(name.to_string());
        self
    }

    pub fn recorded_health(&self) -> Vec<ServiceCheck> {
        self.health.lock().map(|h| h.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl MetricSource for StaticMetrics {
    async fn statistics(&self, query: &MetricQuery) -> Result<Vec<Datapoint>, CloudError> {
        if self.failing.iter().any(|n| n == query.name) {
            return Err(CloudError::Service {
                service: "memory",
                message: format!("{} unavailable", query.name),
            });
        }
        Ok(self.series.get(query.name).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl HealthMetrics for StaticMetrics {
    async fn put_service_health(&self, checks: &[ServiceCheck]) -> Result<(), CloudError> {
        if let Ok(mut health) = self.health.lock() {
            health.extend_from_slice(checks);
        }
        Ok(())
    }
}

/// Keeps every archived snapshot.
#[derive(Debug, Default)]
pub struct MemoryArchive {
    snapshots: Mutex<Vec<(DateTime<Utc>, MetricSeries)>>,
}

impl MemoryArchive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshots(&self) -> Vec<(DateTime<Utc>, MetricSeries)> {
        self.snapshots.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl MetricArchive for MemoryArchive {
    async fn archive(&self, metrics: &MetricSeries, at: DateTime<Utc>) -> Result<(), CloudError> {
        if let Ok(mut snapshots) = self.snapshots.lock() {
            snapshots.push((at, metrics.clone()));
        }
        Ok(())
    }
}

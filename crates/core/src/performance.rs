//! Anomaly detection over load-balancer metric datapoints.
//!
//! Pure threshold arithmetic. The caller fetches the datapoints from the
//! metrics API and passes them in.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::alert::Severity;

/// Average target response time above which an anomaly is raised.
pub const RESPONSE_TIME_THRESHOLD_MS: f64 = 2000.0;

/// 5xx share of all requests, in percent, above which an anomaly is raised.
pub const ERROR_RATE_THRESHOLD_PCT: f64 = 5.0;

pub const METRIC_RESPONSE_TIME: &str = "ResponseTime";
pub const METRIC_ERROR_RATE: &str = "ErrorRate";
pub const METRIC_REQUEST_COUNT: &str = "RequestCount";

pub const ANOMALY_HIGH_RESPONSE_TIME: &str = "high_response_time";
pub const ANOMALY_HIGH_ERROR_RATE: &str = "high_error_rate";

/// One statistics bucket returned by the metrics API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Datapoint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sum: Option<f64>,
}

/// Metric name (see the `METRIC_*` constants) to its datapoints.
pub type MetricSeries = BTreeMap<String, Vec<Datapoint>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    #[serde(rename = "type")]
    pub kind: String,
    pub severity: Severity,
    pub value: f64,
    pub threshold: f64,
    pub message: String,
}

/// Check the collected series against the fixed thresholds.
///
/// A missing datapoint field counts as zero. Empty series never raise.
pub fn detect_anomalies(metrics: &MetricSeries) -> Vec<Anomaly> {
    let mut anomalies = Vec::new();

    if let Some(points) = non_empty(metrics, METRIC_RESPONSE_TIME) {
        let total: f64 = points.iter().map(|dp| dp.average.unwrap_or(0.0)).sum();
        let avg = total / points.len() as f64;

        if avg > RESPONSE_TIME_THRESHOLD_MS {
            anomalies.push(Anomaly {
                kind: ANOMALY_HIGH_RESPONSE_TIME.to_string(),
                severity: Severity::High,
                value: avg,
                threshold: RESPONSE_TIME_THRESHOLD_MS,
                message: format!("Average response time ({avg}ms) exceeds threshold"),
            });
        }
    }

    if let Some(points) = non_empty(metrics, METRIC_ERROR_RATE) {
        let total_errors = sum_of(points);
        let total_requests = metrics
            .get(METRIC_REQUEST_COUNT)
            .map(|p| sum_of(p))
            .unwrap_or(0.0);
        let rate = error_rate_pct(total_errors, total_requests);

        if rate > ERROR_RATE_THRESHOLD_PCT {
            anomalies.push(Anomaly {
                kind: ANOMALY_HIGH_ERROR_RATE.to_string(),
                severity: Severity::Critical,
                value: rate,
                threshold: ERROR_RATE_THRESHOLD_PCT,
                message: format!("Error rate ({rate:.2}%) exceeds threshold"),
            });
        }
    }

    anomalies
}

/// Errors as a percentage of requests; zero when there were no requests.
pub fn error_rate_pct(errors: f64, requests: f64) -> f64 {
    if requests > 0.0 {
        errors / requests * 100.0
    } else {
        0.0
    }
}

fn non_empty<'a>(metrics: &'a MetricSeries, name: &str) -> Option<&'a [Datapoint]> {
    metrics
        .get(name)
        .map(Vec::as_slice)
        .filter(|points| !points.is_empty())
}

fn sum_of(points: &[Datapoint]) -> f64 {
    points.iter().map(|dp| dp.sum.unwrap_or(0.0)).sum()
}

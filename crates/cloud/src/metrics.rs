//! CloudWatch statistics reads and service-health writes.

use std::time::{Duration, SystemTime};

use async_trait::async_trait;
use aws_sdk_cloudwatch::primitives::DateTime;
use aws_sdk_cloudwatch::types::{Dimension, MetricDatum, StandardUnit, Statistic};
use aws_smithy_types::date_time::Format;
use opsconsole_core::health::ServiceCheck;
use opsconsole_core::performance::{
    Datapoint, METRIC_ERROR_RATE, METRIC_REQUEST_COUNT, METRIC_RESPONSE_TIME,
};

use crate::error::CloudError;

/// Namespace for the per-service health gauge.
pub const HEALTH_NAMESPACE: &str = "OpsConsoleAI/Health";
pub const HEALTH_METRIC: &str = "ServiceHealth";

/// Load-balancer namespace the performance series are read from.
pub const ELB_NAMESPACE: &str = "AWS/ApplicationELB";

/// Statistics window: the last five minutes in one bucket.
pub const WINDOW: Duration = Duration::from_secs(5 * 60);
pub const PERIOD_SECS: i32 = 300;

/// One series to collect: our name for it plus where it lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricQuery {
    /// Key used in the collected series map (`ResponseTime`, ...).
    pub name: &'static str,
    pub namespace: &'static str,
    pub metric_name: &'static str,
}

/// Response time, 5xx count and request count from the load balancer.
pub const PERFORMANCE_QUERIES: [MetricQuery; 3] = [
    MetricQuery {
        name: METRIC_RESPONSE_TIME,
        namespace: ELB_NAMESPACE,
        metric_name: "TargetResponseTime",
    },
    MetricQuery {
        name: METRIC_ERROR_RATE,
        namespace: ELB_NAMESPACE,
        metric_name: "HTTPCode_Target_5XX_Count",
    },
    MetricQuery {
        name: METRIC_REQUEST_COUNT,
        namespace: ELB_NAMESPACE,
        metric_name: "RequestCount",
    },
];

/// Reads aggregated datapoints for a metric.
#[async_trait]
pub trait MetricSource: Send + Sync {
    /// Average, maximum and sum over the last [`WINDOW`].
    async fn statistics(&self, query: &MetricQuery) -> Result<Vec<Datapoint>, CloudError>;
}

/// Records one healthy/unhealthy gauge per probed service.
#[async_trait]
pub trait HealthMetrics: Send + Sync {
    async fn put_service_health(&self, checks: &[ServiceCheck]) -> Result<(), CloudError>;
}

#[derive(Debug, Clone)]
pub struct CloudWatchMetrics {
    client: aws_sdk_cloudwatch::Client,
    /// `LoadBalancer` dimension value, e.g. `app/my-alb/50dc6c495c0c9188`.
    load_balancer: Option<String>,
}

impl CloudWatchMetrics {
    pub fn new(sdk_config: &aws_config::SdkConfig, load_balancer: Option<String>) -> Self {
        Self {
            client: aws_sdk_cloudwatch::Client::new(sdk_config),
            load_balancer,
        }
    }
}

#[async_trait]
impl MetricSource for CloudWatchMetrics {
    async fn statistics(&self, query: &MetricQuery) -> Result<Vec<Datapoint>, CloudError> {
        let end = SystemTime::now();
        let start = end - WINDOW;

        let mut request = self
            .client
            .get_metric_statistics()
            .namespace(query.namespace)
            .metric_name(query.metric_name)
            .start_time(DateTime::from(start))
            .end_time(DateTime::from(end))
            .period(PERIOD_SECS)
            .statistics(Statistic::Average)
            .statistics(Statistic::Maximum)
            .statistics(Statistic::Sum);

        if let Some(lb) = &self.load_balancer {
            request = request.dimensions(
                Dimension::builder()
                    .name("LoadBalancer")
                    .value(lb)
                    .build(),
            );
        }

        let output = request
            .send()
            .await
            .map_err(|e| CloudError::service("cloudwatch", e))?;

        Ok(output.datapoints().iter().map(to_datapoint).collect())
    }
}

#[async_trait]
impl HealthMetrics for CloudWatchMetrics {
    async fn put_service_health(&self, checks: &[ServiceCheck]) -> Result<(), CloudError> {
        if checks.is_empty() {
            return Ok(());
        }

        let now = DateTime::from(SystemTime::now());
        let data: Vec<MetricDatum> = checks
            .iter()
            .map(|check| health_datum(check, now))
            .collect();

        self.client
            .put_metric_data()
            .namespace(HEALTH_NAMESPACE)
            .set_metric_data(Some(data))
            .send()
            .await
            .map_err(|e| CloudError::service("cloudwatch", e))?;

        tracing::debug!(services = checks.len(), "Service health metrics published");
        Ok(())
    }
}

fn to_datapoint(dp: &aws_sdk_cloudwatch::types::Datapoint) -> Datapoint {
    Datapoint {
        timestamp: dp.timestamp().and_then(|t| t.fmt(Format::DateTime).ok()),
        average: dp.average(),
        maximum: dp.maximum(),
        sum: dp.sum(),
    }
}

/// 1 for healthy, 0 otherwise, dimensioned by service name.
fn health_datum(check: &ServiceCheck, at: DateTime) -> MetricDatum {
    MetricDatum::builder()
        .metric_name(HEALTH_METRIC)
        .dimensions(
            Dimension::builder()
                .name("Service")
                .value(&check.service)
                .build(),
        )
        .value(if check.is_healthy() { 1.0 } else { 0.0 })
        .unit(StandardUnit::Count)
        .timestamp(at)
        .build()
}

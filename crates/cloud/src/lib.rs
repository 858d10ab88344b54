//! Managed cloud services used by the monitoring jobs.
//!
//! Each concern sits behind an async trait so the jobs can run against
//! in-memory fakes:
//!
//! - [`AlertPublisher`]: pub/sub alert topics ([`SnsPublisher`]).
//! - [`MetricSource`] / [`HealthMetrics`]: metrics API ([`CloudWatchMetrics`]).
//! - [`MetricArchive`]: key-value archive with TTL ([`DynamoMetricArchive`]).
//!
//! [`memory`] holds in-process implementations of all three.

pub mod alerts;
pub mod archive;
pub mod error;
pub mod memory;
pub mod metrics;

pub use alerts::{AlertPublisher, AlertTopics, SnsPublisher};
pub use archive::{DynamoMetricArchive, MetricArchive};
pub use error::CloudError;
pub use metrics::{CloudWatchMetrics, HealthMetrics, MetricQuery, MetricSource};

/// Load AWS credentials and region from the standard provider chain.
pub async fn load_sdk_config() -> aws_config::SdkConfig {
    aws_config::load_from_env().await
}

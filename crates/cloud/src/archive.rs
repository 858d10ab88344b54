//! Metric snapshots archived to DynamoDB with a time-to-live.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use opsconsole_core::performance::MetricSeries;

use crate::error::CloudError;

/// Archived snapshots expire after this many days.
pub const RETENTION_DAYS: i64 = 30;

/// Stores a collected metric snapshot.
#[async_trait]
pub trait MetricArchive: Send + Sync {
    async fn archive(&self, metrics: &MetricSeries, at: DateTime<Utc>) -> Result<(), CloudError>;
}

#[derive(Debug, Clone)]
pub struct DynamoMetricArchive {
    client: aws_sdk_dynamodb::Client,
    table: String,
}

impl DynamoMetricArchive {
    pub fn new(sdk_config: &aws_config::SdkConfig, table: impl Into<String>) -> Self {
        Self {
            client: aws_sdk_dynamodb::Client::new(sdk_config),
            table: table.into(),
        }
    }
}

#[async_trait]
impl MetricArchive for DynamoMetricArchive {
    async fn archive(&self, metrics: &MetricSeries, at: DateTime<Utc>) -> Result<(), CloudError> {
        let item = snapshot_item(metrics, at)?;

        self.client
            .put_item()
            .table_name(&self.table)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| CloudError::service("dynamodb", e))?;

        tracing::debug!(table = %self.table, series = metrics.len(), "Metric snapshot archived");
        Ok(())
    }
}

/// Unix seconds at which an item written at `at` expires.
pub fn expires_at(at: DateTime<Utc>) -> i64 {
    (at + Duration::days(RETENTION_DAYS)).timestamp()
}

/// `timestamp` (ISO-8601, the key), `metrics` (JSON) and `ttl` attributes.
fn snapshot_item(
    metrics: &MetricSeries,
    at: DateTime<Utc>,
) -> Result<HashMap<String, AttributeValue>, CloudError> {
    let mut item = HashMap::new();
    item.insert(
        "timestamp".to_string(),
        AttributeValue::S(at.to_rfc3339_opts(SecondsFormat::Millis, true)),
    );
    item.insert(
        "metrics".to_string(),
        AttributeValue::S(serde_json::to_string(metrics)?),
    );
    item.insert(
        "ttl".to_string(),
        AttributeValue::N(expires_at(at).to_string()),
    );
    Ok(item)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use opsconsole_core::performance::{Datapoint, METRIC_REQUEST_COUNT};

    use super::*;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, 10, 0, 0).unwrap()
    }

    #[test]
    fn ttl_is_thirty_days_out() {
        assert_eq!(expires_at(at()) - at().timestamp(), 30 * 24 * 60 * 60);
    }

    #[test]
    fn snapshot_item_attributes() {
        let mut metrics = MetricSeries::new();
        metrics.insert(
            METRIC_REQUEST_COUNT.to_string(),
            vec![Datapoint {
                sum: Some(120.0),
                ..Default::default()
            }],
        );

        let item = snapshot_item(&metrics, at()).unwrap();

        assert_eq!(
            item["timestamp"],
            AttributeValue::S("2025-01-15T10:00:00.000Z".into())
        );
        assert_eq!(
            item["ttl"],
            AttributeValue::N(expires_at(at()).to_string())
        );
        let AttributeValue::S(json) = &item["metrics"] else {
            panic!("metrics should be a string attribute");
        };
        let parsed: serde_json::Value = serde_json::from_str(json).unwrap();
        assert_eq!(parsed["RequestCount"][0]["Sum"], 120.0);
    }
}

//! Alert forwarding to pub/sub topics.

use async_trait::async_trait;
use opsconsole_core::alert::{Alert, AlertTopic};

use crate::error::CloudError;

/// Forwards an [`Alert`] to whatever channel backs its topic.
#[async_trait]
pub trait AlertPublisher: Send + Sync {
    async fn publish(&self, alert: &Alert) -> Result<(), CloudError>;
}

/// Topic ARN per [`AlertTopic`]. Unset topics reject their alerts.
#[derive(Debug, Clone, Default)]
pub struct AlertTopics {
    pub health: Option<String>,
    pub performance: Option<String>,
    pub security: Option<String>,
}

impl AlertTopics {
    /// Read `HEALTH_ALERTS_TOPIC`, `PERFORMANCE_ALERTS_TOPIC` and
    /// `SECURITY_ALERTS_TOPIC`. Blank values count as unset.
    pub fn from_env() -> Self {
        let read = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        Self {
            health: read("HEALTH_ALERTS_TOPIC"),
            performance: read("PERFORMANCE_ALERTS_TOPIC"),
            security: read("SECURITY_ALERTS_TOPIC"),
        }
    }

    pub fn arn_for(&self, topic: AlertTopic) -> Option<&str> {
        match topic {
            AlertTopic::Health => self.health.as_deref(),
            AlertTopic::Performance => self.performance.as_deref(),
            AlertTopic::Security => self.security.as_deref(),
        }
    }

    pub fn any_configured(&self) -> bool {
        self.health.is_some() || self.performance.is_some() || self.security.is_some()
    }
}

/// Publishes alerts to SNS; the message is the alert's JSON body.
#[derive(Debug, Clone)]
pub struct SnsPublisher {
    client: aws_sdk_sns::Client,
    topics: AlertTopics,
}

impl SnsPublisher {
    pub fn new(sdk_config: &aws_config::SdkConfig, topics: AlertTopics) -> Self {
        Self {
            client: aws_sdk_sns::Client::new(sdk_config),
            topics,
        }
    }

    pub fn topics(&self) -> &AlertTopics {
        &self.topics
    }
}

#[async_trait]
impl AlertPublisher for SnsPublisher {
    async fn publish(&self, alert: &Alert) -> Result<(), CloudError> {
        let arn = self
            .topics
            .arn_for(alert.topic)
            .ok_or(CloudError::TopicNotConfigured(alert.topic.as_str()))?;

        let message = serde_json::to_string(&alert.message)?;

        let output = self
            .client
            .publish()
            .topic_arn(arn)
            .subject(&alert.subject)
            .message(message)
            .send()
            .await
            .map_err(|e| CloudError::service("sns", e))?;

        tracing::info!(
            topic = alert.topic.as_str(),
            subject = %alert.subject,
            severity = %alert.severity,
            message_id = output.message_id().unwrap_or_default(),
            "Alert published"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use opsconsole_core::alert::Severity;

    use super::*;

    #[test]
    fn arn_lookup_per_topic() {
        let topics = AlertTopics {
            health: Some("arn:aws:sns:us-east-1:1:health".into()),
            performance: None,
            security: Some("arn:aws:sns:us-east-1:1:security".into()),
        };
        assert_eq!(
            topics.arn_for(AlertTopic::Health),
            Some("arn:aws:sns:us-east-1:1:health")
        );
        assert_eq!(topics.arn_for(AlertTopic::Performance), None);
        assert!(topics.any_configured());
        assert!(!AlertTopics::default().any_configured());
    }

    #[tokio::test]
    async fn unconfigured_topic_is_rejected_before_any_call() {
        let sdk_config = aws_config::SdkConfig::builder()
            .behavior_version(aws_config::BehaviorVersion::latest())
            .build();
        let publisher = SnsPublisher::new(&sdk_config, AlertTopics::default());
        let alert = Alert::new(
            AlertTopic::Performance,
            "Performance Alert: high_error_rate",
            serde_json::json!({}),
            Severity::Critical,
        );
        assert_matches!(
            publisher.publish(&alert).await,
            Err(CloudError::TopicNotConfigured("performance"))
        );
    }
}

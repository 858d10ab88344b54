//! Alert types forwarded to the managed pub/sub topics.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity attached to forwarded alerts. Serialised upper-case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which topic an alert goes to. Each maps to its own configured topic ARN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertTopic {
    Health,
    Performance,
    Security,
}

impl AlertTopic {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Health => "health",
            Self::Performance => "performance",
            Self::Security => "security",
        }
    }
}

/// A single notification destined for a pub/sub topic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub topic: AlertTopic,
    pub subject: String,
    /// JSON body published as the message.
    pub message: serde_json::Value,
    pub severity: Severity,
}

impl Alert {
    pub fn new(
        topic: AlertTopic,
        subject: impl Into<String>,
        message: serde_json::Value,
        severity: Severity,
    ) -> Self {
        Self {
            topic,
            subject: subject.into(),
            message,
            severity,
        }
    }

    /// Event-bus name for this alert, e.g. `alert.security`.
    pub fn event_type(&self) -> String {
        format!("alert.{}", self.topic.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_serialises_upper_case() {
        assert_eq!(serde_json::to_value(Severity::High).unwrap(), "HIGH");
        assert!(Severity::Critical > Severity::Low);
    }

    #[test]
    fn event_type_uses_topic() {
        let alert = Alert::new(
            AlertTopic::Performance,
            "Performance Alert: high_error_rate",
            serde_json::json!({}),
            Severity::Critical,
        );
        assert_eq!(alert.event_type(), "alert.performance");
    }
}

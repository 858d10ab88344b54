//! Service health checks and their aggregation into one overall status.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::alert::Severity;

/// Up to this many unhealthy services the system is only degraded.
pub const DEGRADED_MAX_UNHEALTHY: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Healthy,
    Unhealthy,
}

/// Result of probing one service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCheck {
    pub service: String,
    pub status: ServiceStatus,
    /// Milliseconds; subscribers read it as `responseTime`.
    #[serde(rename = "responseTime", skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServiceCheck {
    /// A probe that got an HTTP answer.
    pub fn responded(service: impl Into<String>, healthy: bool, response_time_ms: u64) -> Self {
        Self {
            service: service.into(),
            status: if healthy {
                ServiceStatus::Healthy
            } else {
                ServiceStatus::Unhealthy
            },
            response_time_ms: Some(response_time_ms),
            details: None,
            error: None,
        }
    }

    /// A probe that never got an answer (DNS, connect, timeout).
    pub fn failed(service: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            status: ServiceStatus::Unhealthy,
            response_time_ms: None,
            details: None,
            error: Some(error.into()),
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn is_healthy(&self) -> bool {
        self.status == ServiceStatus::Healthy
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

impl OverallStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Degraded => "degraded",
            Self::Unhealthy => "unhealthy",
        }
    }

    /// Severity used when this status is forwarded as an alert.
    pub fn severity(self) -> Severity {
        match self {
            Self::Healthy => Severity::Low,
            Self::Degraded => Severity::Medium,
            Self::Unhealthy => Severity::Critical,
        }
    }
}

impl fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverallHealth {
    pub status: OverallStatus,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<ServiceCheck>,
}

/// Reduce individual checks to one status by counting unhealthy services.
pub fn determine_overall_health(checks: &[ServiceCheck]) -> OverallHealth {
    let issues: Vec<ServiceCheck> = checks.iter().filter(|c| !c.is_healthy()).cloned().collect();

    let (status, message) = match issues.len() {
        0 => (OverallStatus::Healthy, "All services operational"),
        n if n <= DEGRADED_MAX_UNHEALTHY => {
            (OverallStatus::Degraded, "Some services experiencing issues")
        }
        _ => (OverallStatus::Unhealthy, "Multiple services down"),
    };

    OverallHealth {
        status,
        message: message.to_string(),
        issues,
    }
}

//! Scheduled monitoring jobs.
//!
//! - [`health`]: probe the app, database, AI endpoint and external services,
//!   then alert and record per-service gauges.
//! - [`performance`]: pull load-balancer statistics, detect anomalies, alert
//!   and archive.
//! - [`auth`]: turn auth-backend webhook events into security alerts.
//!
//! The jobs depend only on the traits in `opsconsole_cloud`, so the API can
//! run them in-process and tests can run them against fakes.

pub mod auth;
pub mod config;
pub mod error;
pub mod health;
pub mod performance;
pub mod schedule;

pub use config::MonitorConfig;
pub use error::MonitorError;
pub use health::{HealthMonitor, HealthReport};
pub use performance::{PerformanceMonitor, PerformanceReport};

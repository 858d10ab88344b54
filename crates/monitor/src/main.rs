use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use opsconsole_cloud::{
    AlertPublisher, CloudWatchMetrics, DynamoMetricArchive, MetricArchive, SnsPublisher,
};
use opsconsole_monitor::schedule::run_every;
use opsconsole_monitor::{HealthMonitor, MonitorConfig, PerformanceMonitor};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "opsconsole_monitor=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let once = std::env::args().skip(1).any(|arg| arg == "--once");

    // --- Configuration ---
    let config = MonitorConfig::from_env();
    if !config.topics.any_configured() {
        tracing::warn!("No alert topics configured; alerts will fail to publish");
    }

    // --- Cloud clients ---
    let sdk_config = opsconsole_cloud::load_sdk_config().await;
    let alerts: Arc<dyn AlertPublisher> =
        Arc::new(SnsPublisher::new(&sdk_config, config.topics.clone()));
    let metrics = Arc::new(CloudWatchMetrics::new(
        &sdk_config,
        config.load_balancer.clone(),
    ));
    let archive: Option<Arc<dyn MetricArchive>> = config.metrics_table.as_ref().map(|table| {
        Arc::new(DynamoMetricArchive::new(&sdk_config, table.clone())) as Arc<dyn MetricArchive>
    });

    let health = Arc::new(
        HealthMonitor::new(config.clone(), Arc::clone(&alerts), metrics.clone())
            .context("Failed to build health monitor")?,
    );
    let performance = Arc::new(PerformanceMonitor::new(metrics, alerts, archive));

    if once {
        let report = health.run_health_check().await;
        println!("{}", serde_json::to_string_pretty(&report)?);
        let report = performance.run_performance_monitor().await;
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    // --- Scheduled jobs ---
    let cancel = CancellationToken::new();

    let health_handle = tokio::spawn(run_every(
        "health",
        config.health_interval,
        cancel.clone(),
        move || {
            let health = Arc::clone(&health);
            async move {
                health.run_health_check().await;
            }
        },
    ));
    let performance_handle = tokio::spawn(run_every(
        "performance",
        config.performance_interval,
        cancel.clone(),
        move || {
            let performance = Arc::clone(&performance);
            async move {
                performance.run_performance_monitor().await;
            }
        },
    ));

    tracing::info!(
        health_interval_secs = config.health_interval.as_secs(),
        performance_interval_secs = config.performance_interval.as_secs(),
        "Monitor started"
    );

    shutdown_signal().await;
    tracing::info!("Shutdown signal received, stopping jobs");

    cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(15), health_handle).await;
    let _ = tokio::time::timeout(Duration::from_secs(15), performance_handle).await;

    tracing::info!("Monitor stopped");
    Ok(())
}

/// Wait for SIGINT or (on Unix) SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use opsconsole_api::alerts::BusAlertPublisher;
use opsconsole_api::background::monitor::{self, MonitoringStatus};
use opsconsole_api::config::ServerConfig;
use opsconsole_api::notifications::NotificationRouter;
use opsconsole_api::router::build_app_router;
use opsconsole_api::state::AppState;
use opsconsole_cloud::{
    AlertPublisher, CloudWatchMetrics, DynamoMetricArchive, MetricArchive, SnsPublisher,
};
use opsconsole_db::{ConsoleStore, MemoryStore, PgStore};
use opsconsole_events::{EmailConfig, EmailDelivery, EventBus, WebhookDelivery};
use opsconsole_genai::{GeminiClient, GeminiConfig, TextGenerator};
use opsconsole_monitor::{HealthMonitor, MonitorConfig, PerformanceMonitor};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "opsconsole_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Store ---
    let store: Arc<dyn ConsoleStore> = match std::env::var("DATABASE_URL") {
        Ok(database_url) => {
            let pool = opsconsole_db::create_pool(&database_url)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connection pool created");

            opsconsole_db::health_check(&pool)
                .await
                .expect("Database health check failed");

            opsconsole_db::run_migrations(&pool)
                .await
                .expect("Failed to run database migrations");
            tracing::info!("Database migrations applied");

            Arc::new(PgStore::new(pool))
        }
        Err(_) => {
            tracing::warn!("DATABASE_URL not set, serving seeded in-memory data");
            Arc::new(MemoryStore::seeded())
        }
    };

    // --- Chat model ---
    let gemini_config = GeminiConfig::from_env();
    if gemini_config.api_key.is_none() {
        tracing::warn!("No GOOGLE_API_KEY or GEMINI_API_KEY set; chat requests will fail");
    }
    let gemini = GeminiClient::new(gemini_config).expect("Failed to build Gemini client");
    tracing::info!(model = gemini.model(), "Chat model configured");
    let generator: Arc<dyn TextGenerator> = Arc::new(gemini);

    // --- Events and alerts ---
    let event_bus = Arc::new(EventBus::default());

    let monitor_config = MonitorConfig::from_env();
    let needs_cloud =
        monitor_config.app_url.is_some() || monitor_config.topics.any_configured();
    let sdk_config = if needs_cloud {
        Some(opsconsole_cloud::load_sdk_config().await)
    } else {
        None
    };

    let upstream: Option<Arc<dyn AlertPublisher>> = sdk_config
        .as_ref()
        .filter(|_| monitor_config.topics.any_configured())
        .map(|sdk| {
            Arc::new(SnsPublisher::new(sdk, monitor_config.topics.clone())) as Arc<dyn AlertPublisher>
        });
    if upstream.is_none() {
        tracing::info!("No alert topics configured; alerts stay in-process");
    }
    let alerts: Arc<dyn AlertPublisher> =
        Arc::new(BusAlertPublisher::new(Arc::clone(&event_bus), upstream));

    let email = EmailConfig::from_env().map(EmailDelivery::new);
    let notification_router =
        NotificationRouter::new(Arc::clone(&store), WebhookDelivery::new(), email);
    let router_handle = tokio::spawn(notification_router.run(event_bus.subscribe()));

    // --- In-process monitoring ---
    let monitor_cancel = CancellationToken::new();
    let (monitoring, monitor_handles) = match (&monitor_config.app_url, &sdk_config) {
        (Some(_), Some(sdk)) => {
            let metrics = Arc::new(CloudWatchMetrics::new(
                sdk,
                monitor_config.load_balancer.clone(),
            ));
            let health = Arc::new(
                HealthMonitor::new(monitor_config.clone(), Arc::clone(&alerts), metrics.clone())
                    .expect("Failed to build health monitor"),
            );

            let performance = monitor_config.load_balancer.as_ref().map(|_| {
                let archive: Option<Arc<dyn MetricArchive>> =
                    monitor_config.metrics_table.as_ref().map(|table| {
                        Arc::new(DynamoMetricArchive::new(sdk, table.clone()))
                            as Arc<dyn MetricArchive>
                    });
                Arc::new(PerformanceMonitor::new(
                    metrics.clone(),
                    Arc::clone(&alerts),
                    archive,
                ))
            });

            let status = Arc::new(MonitoringStatus::enabled());
            let handles = monitor::spawn(
                health,
                performance,
                Arc::clone(&status),
                Duration::from_secs(config.monitor_interval_secs.max(1)),
                monitor_cancel.clone(),
            );
            (status, handles)
        }
        _ => {
            tracing::info!("APP_URL not set, in-process monitoring disabled");
            (Arc::new(MonitoringStatus::disabled()), Vec::new())
        }
    };

    let state = AppState {
        store,
        generator,
        config: Arc::new(config.clone()),
        event_bus: Arc::clone(&event_bus),
        alerts: Arc::clone(&alerts),
        monitoring,
    };

    let app = build_app_router(state, &config);

    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Server stopped accepting connections, cleaning up");

    let drain = Duration::from_secs(config.shutdown_timeout_secs);

    monitor_cancel.cancel();
    for handle in monitor_handles {
        let _ = tokio::time::timeout(drain, handle).await;
    }
    tracing::info!("Monitoring jobs stopped");

    // The router exits once every bus handle is gone.
    drop(alerts);
    drop(event_bus);
    let _ = tokio::time::timeout(drain, router_handle).await;
    tracing::info!("Notification router shut down");

    tracing::info!("Graceful shutdown complete");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}

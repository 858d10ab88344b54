use std::time::Duration;

use opsconsole_cloud::AlertTopics;

pub const DEFAULT_GOOGLE_AI_URL: &str = "https://generativelanguage.googleapis.com";

/// Default spacing between runs of each scheduled job.
pub const DEFAULT_INTERVAL_SECS: u64 = 300;

/// Per-probe HTTP timeout.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings shared by the monitoring jobs.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Base URL of the console API (`/health` and `/api/v1/chat` are probed).
    pub app_url: Option<String>,
    /// Hosted database project URL; its `/rest/v1/` endpoint is probed.
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<String>,
    pub google_ai_url: String,
    pub topics: AlertTopics,
    /// DynamoDB table for archived metric snapshots. Unset disables archiving.
    pub metrics_table: Option<String>,
    /// `LoadBalancer` dimension for the performance statistics.
    pub load_balancer: Option<String>,
    pub health_interval: Duration,
    pub performance_interval: Duration,
    pub probe_timeout: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            app_url: None,
            supabase_url: None,
            supabase_anon_key: None,
            google_ai_url: DEFAULT_GOOGLE_AI_URL.to_string(),
            topics: AlertTopics::default(),
            metrics_table: None,
            load_balancer: None,
            health_interval: Duration::from_secs(DEFAULT_INTERVAL_SECS),
            performance_interval: Duration::from_secs(DEFAULT_INTERVAL_SECS),
            probe_timeout: PROBE_TIMEOUT,
        }
    }
}

impl MonitorConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env var                      | Default                                     |
    /// |------------------------------|---------------------------------------------|
    /// | `APP_URL`                    | unset                                       |
    /// | `SUPABASE_URL`               | unset                                       |
    /// | `SUPABASE_ANON_KEY`          | unset                                       |
    /// | `GOOGLE_AI_URL`              | `https://generativelanguage.googleapis.com` |
    /// | `HEALTH_ALERTS_TOPIC` etc.   | unset                                       |
    /// | `METRICS_TABLE`              | unset                                       |
    /// | `LOAD_BALANCER`              | unset                                       |
    /// | `HEALTH_CHECK_INTERVAL_SECS` | `300`                                       |
    /// | `PERFORMANCE_INTERVAL_SECS`  | `300`                                       |
    pub fn from_env() -> Self {
        let read = |name: &str| {
            std::env::var(name)
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let secs = |name: &str| {
            read(name)
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|s| *s > 0)
                .unwrap_or(DEFAULT_INTERVAL_SECS)
        };

        Self {
            app_url: read("APP_URL").map(|u| u.trim_end_matches('/').to_string()),
            supabase_url: read("SUPABASE_URL").map(|u| u.trim_end_matches('/').to_string()),
            supabase_anon_key: read("SUPABASE_ANON_KEY"),
            google_ai_url: read("GOOGLE_AI_URL").unwrap_or_else(|| DEFAULT_GOOGLE_AI_URL.into()),
            topics: AlertTopics::from_env(),
            metrics_table: read("METRICS_TABLE"),
            load_balancer: read("LOAD_BALANCER"),
            health_interval: Duration::from_secs(secs("HEALTH_CHECK_INTERVAL_SECS")),
            performance_interval: Duration::from_secs(secs("PERFORMANCE_INTERVAL_SECS")),
            probe_timeout: PROBE_TIMEOUT,
        }
    }
}

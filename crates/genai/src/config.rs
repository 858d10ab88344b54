use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for [`GeminiClient`](crate::GeminiClient).
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key; `None` leaves the client unable to answer.
    pub api_key: Option<String>,
    pub model: String,
    /// Scheme and host, without the `/v1beta` path.
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl GeminiConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env var               | Default                                      |
    /// |-----------------------|----------------------------------------------|
    /// | `GOOGLE_API_KEY`      | falls back to `GEMINI_API_KEY`, else none    |
    /// | `GEMINI_MODEL`        | `gemini-2.5-flash`                           |
    /// | `GEMINI_BASE_URL`     | `https://generativelanguage.googleapis.com`  |
    /// | `GEMINI_TIMEOUT_SECS` | `30`                                         |
    pub fn from_env() -> Self {
        let api_key = ["GOOGLE_API_KEY", "GEMINI_API_KEY"]
            .iter()
            .filter_map(|name| std::env::var(name).ok())
            .map(|key| key.trim().to_string())
            .find(|key| !key.is_empty());

        let model = std::env::var("GEMINI_MODEL")
            .ok()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let base_url = std::env::var("GEMINI_BASE_URL")
            .ok()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_secs: u64 = std::env::var("GEMINI_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self {
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

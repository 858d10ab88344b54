use opsconsole_cloud::CloudError;

#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    /// The event body was not a valid auth event.
    #[error("Invalid auth event: {0}")]
    InvalidEvent(#[from] serde_json::Error),

    #[error(transparent)]
    Cloud(#[from] CloudError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

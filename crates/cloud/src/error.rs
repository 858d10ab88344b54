use aws_smithy_types::error::display::DisplayErrorContext;

#[derive(Debug, thiserror::Error)]
pub enum CloudError {
    /// No topic ARN is configured for this alert topic.
    #[error("No topic configured for {0} alerts")]
    TopicNotConfigured(&'static str),

    /// A managed-service call failed.
    #[error("{service} request failed: {message}")]
    Service {
        service: &'static str,
        message: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CloudError {
    /// Flatten an SDK error (including its source chain) into a message.
    pub fn service<E>(service: &'static str, err: E) -> Self
    where
        E: std::error::Error,
    {
        Self::Service {
            service,
            message: DisplayErrorContext(err).to_string(),
        }
    }
}

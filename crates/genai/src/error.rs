/// Errors raised while calling the hosted model.
#[derive(Debug, thiserror::Error)]
pub enum GenAiError {
    /// Transport failure, timeout, or an undecodable body.
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },

    /// The API answered but produced no candidate text.
    #[error("Model returned an empty response")]
    EmptyResponse,

    /// No API key configured.
    #[error("No API key configured (set GOOGLE_API_KEY or GEMINI_API_KEY)")]
    MissingApiKey,
}

/// Errors raised by a [`ConsoleStore`](crate::ConsoleStore) backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A uniqueness rule was violated (e.g. duplicate email).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A stored row could not be mapped back into a model.
    #[error("Corrupt row: {0}")]
    Corrupt(String),
}

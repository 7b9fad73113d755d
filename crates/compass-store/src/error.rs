/// Errors that can occur within the store layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Transport-level failure (connect, timeout, body decode).
    #[error("Store: HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The table API replied with a non-success status.
    #[error("Store: table API error {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    /// An update succeeded at the HTTP level but affected no rows, which
    /// means the target id no longer exists.
    #[error("Store: update of competitor {id} returned no rows")]
    UpdateReadback { id: i64 },
}

/// Convenience `Result` alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

//! DataMall client error types.

/// Errors that can occur when fetching bus arrivals.
#[derive(Debug, thiserror::Error)]
pub enum DatamallError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Account key rejected
    #[error("unauthorized: check the DataMall account key")]
    Unauthorized,

    /// API returned an error status
    #[error("bad response {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },
}

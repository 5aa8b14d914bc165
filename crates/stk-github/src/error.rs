//! GitHub client error types.

use thiserror::Error;

/// Errors that can occur when reading from the GitHub API.
#[derive(Debug, Error)]
pub enum GithubError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the API.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The requested resource does not exist (404).
    #[error("not found")]
    NotFound,

    /// The API returned a 429 Too Many Requests response.
    #[error("rate limited — retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// A response body could not be decoded (base64 or UTF-8).
    #[error("decode error: {0}")]
    Decode(String),
}

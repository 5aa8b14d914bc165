//! Sink error types.

use thiserror::Error;

/// Errors that can occur when publishing a row to the spreadsheet API.
#[derive(Debug, Error)]
pub enum SheetsError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The sink returned a non-2xx status.
    #[error("sink rejected row ({status}): {body}")]
    Api {
        /// HTTP status code returned by the sink.
        status: u16,
        /// Response body, for operator diagnosis.
        body: String,
    },
}

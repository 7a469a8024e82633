//! Error types for the catalog service client.

use muse_core::MuseError;
use thiserror::Error;

/// Errors that can occur when talking to the catalog service.
#[derive(Error, Debug)]
pub enum CatalogClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Service returned a failure response
    #[error("Catalog service error ({status}): {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body or failure message
        message: String,
    },

    /// Invalid service URL
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse a service response
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Service is offline or unreachable
    #[error("Catalog service unreachable: {0}")]
    Unreachable(String),
}

/// Result type for catalog client operations.
pub type Result<T> = std::result::Result<T, CatalogClientError>;

impl From<CatalogClientError> for MuseError {
    fn from(err: CatalogClientError) -> Self {
        match err {
            CatalogClientError::Status { status, message } => MuseError::service(status, message),
            // Status 0 marks failures with no HTTP response at all
            other => MuseError::service(0, other.to_string()),
        }
    }
}

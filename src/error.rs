//! Error types for mock-fetch.

use reqwest::{Method, StatusCode};
use std::sync::Arc;
use thiserror::Error;

/// Result type alias for mock-fetch operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in mock-fetch.
#[derive(Debug, Error)]
pub enum Error {
    /// No mock matched and the request was not allowed to reach the network.
    #[error("no mock registered for {method} {url}")]
    NotMocked { method: Method, url: String },

    /// The error a mock was configured to raise, returned as-is.
    #[error(transparent)]
    Thrown(Arc<dyn std::error::Error + Send + Sync>),

    /// A pattern could not be compiled.
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// The real transport failed.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// A body could not be encoded or decoded as JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A form body could not be url-encoded.
    #[error("form encoding error: {0}")]
    Form(#[from] serde_urlencoded::ser::Error),

    /// A file-backed body could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A mock declared a status outside `100..=999`.
    #[error("invalid status code: {0}")]
    InvalidStatus(u16),

    /// A declared header name or value is not valid HTTP.
    #[error("invalid header: {0}")]
    InvalidHeader(String),
}

impl Error {
    /// The HTTP status this error stands for, if any.
    ///
    /// Unmatched requests rejected while real requests are disabled report
    /// `404 Not Found`.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::NotMocked { .. } => Some(StatusCode::NOT_FOUND),
            Error::Http(e) => e.status(),
            _ => None,
        }
    }

    /// The configured error, if this is one raised by a mock.
    pub fn thrown(&self) -> Option<&Arc<dyn std::error::Error + Send + Sync>> {
        match self {
            Error::Thrown(e) => Some(e),
            _ => None,
        }
    }
}

use reqwest::StatusCode;
use thiserror::Error;

/// Errors returned by the Salsify API client.
#[derive(Debug, Error)]
pub enum SalsifyError {
    /// Network, TLS, or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Salsify answered with a non-success status. Carries the full response
    /// body text so callers can surface it unmodified.
    #[error("Salsify returned HTTP {status}")]
    UpstreamStatus { status: StatusCode, body: String },

    /// The response body could not be parsed as JSON.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

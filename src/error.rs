//! Error types for Cloud Foundry API operations.

use thiserror::Error;

use crate::timestamp::KNOWN_FORMATS;

/// Errors that can occur during Cloud Foundry API operations.
#[derive(Debug, Error)]
pub enum CfError {
    /// Configuration is missing or incomplete.
    #[error("Cloud Foundry configuration required: {0}")]
    ConfigMissing(String),

    /// Entity not found.
    #[error("{entity_type} '{id}' not found")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// The entity was decoded outside a client context and cannot issue
    /// follow-up requests.
    #[error("{entity_type} is not attached to a client")]
    Detached { entity_type: &'static str },

    /// The API returned a non-success status.
    #[error("Cloud Foundry API error: {message}")]
    ApiError {
        message: String,
        status_code: Option<u16>,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// A page of a paginated collection did not match the expected shape.
    #[error("failed to decode page {page} from '{url}': {source}")]
    Decode {
        url: String,
        page: u32,
        #[source]
        source: serde_json::Error,
    },

    /// JSON parsing error outside a paginated fetch.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// An epoch-seconds timestamp was not numeric or out of range.
    #[error("malformed epoch timestamp '{value}'")]
    MalformedTimestamp { value: String },

    /// A free-form timestamp matched none of the known date formats.
    #[error("'{value}' was not in any of the expected date formats {:?}", KNOWN_FORMATS)]
    UnrecognizedTimestampFormat { value: String },

    /// Rate limited.
    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },
}

/// Result type alias for Cloud Foundry operations.
pub type Result<T> = core::result::Result<T, CfError>;

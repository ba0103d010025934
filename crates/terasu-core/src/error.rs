//! Error types for content access.

use thiserror::Error;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to the content store.
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP transport error (connection refused, timeout, TLS, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The content API returned a non-success status code.
    #[error("content API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the API.
        status: u16,
        /// Response body, usually a JSON error description.
        message: String,
    },

    /// A response or document did not have the expected shape.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The local snapshot file is malformed.
    #[error("snapshot error at line {line}: {reason}")]
    Snapshot {
        /// 1-based line number in the NDJSON file.
        line: usize,
        /// Description of what's wrong.
        reason: String,
    },

    /// I/O error while reading a snapshot.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An operation needs a credential that is not configured.
    #[error("missing credential: {0} is not configured")]
    MissingToken(&'static str),

    /// The backend cannot perform this operation.
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),
}

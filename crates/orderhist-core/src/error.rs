//! Error types for the orderhist-core library.

use thiserror::Error;

/// Main error type for the orderhist library.
#[derive(Error, Debug)]
pub enum OrderhistError {
    /// Page retrieval failed.
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// CSV read/write error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid glob pattern for the local page set.
    #[error("pattern error: {0}")]
    Pattern(#[from] glob::PatternError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while retrieving a page.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport-level failure (DNS, TLS, timeout, reset).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status.
    #[error("unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    /// Session header values could not be built.
    #[error("invalid session header {name}: {reason}")]
    Header { name: String, reason: String },
}

/// Why a single field (or item cell) fell back to empty.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// The anchor pattern matched no text node.
    #[error("anchor not found for {field}")]
    NotFound { field: String },

    /// The anchor matched but navigation or cleanup did not find the value.
    #[error("unexpected structure for {field}: {reason}")]
    StructureMismatch { field: String, reason: String },
}

impl FieldError {
    /// Name of the field the failure belongs to.
    pub fn field(&self) -> &str {
        match self {
            FieldError::NotFound { field } | FieldError::StructureMismatch { field, .. } => field,
        }
    }
}

/// Result type for the orderhist library.
pub type Result<T> = std::result::Result<T, OrderhistError>;

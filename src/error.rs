//! Error types for loading, discovery, and viewer operations.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to load a single document or candidate listing.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Transport-level failure (connection refused, DNS, TLS, body read).
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// Server answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    /// Response was not declared as JSON.
    #[error("{url} has content type {}, expected JSON", .content_type.as_deref().unwrap_or("<none>"))]
    ContentType {
        url: String,
        content_type: Option<String>,
    },
    /// Body was not valid JSON.
    #[error("{file} is not valid JSON: {source}")]
    Malformed {
        file: String,
        #[source]
        source: serde_json::Error,
    },
    /// Body was JSON but not an array of records.
    #[error("{file} is not a JSON array")]
    NotAnArray { file: String },
    /// Local file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Identifier tried to escape the data directory.
    #[error("invalid file name: {0}")]
    InvalidName(String),
    /// Identifier is unknown to the source.
    #[error("no such file: {0}")]
    NotFound(String),
    /// Load exceeded the configured bound.
    #[error("loading {file} timed out after {secs}s")]
    Timeout { file: String, secs: u64 },
    /// Base location could not be turned into a URL.
    #[error("invalid base URL {base}: {source}")]
    BaseUrl {
        base: String,
        #[source]
        source: url::ParseError,
    },
}

/// Discovery could not produce any displayable file.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("failed to list candidate files: {0}")]
    Listing(#[source] SourceError),
    #[error("no candidate files found")]
    NoCandidates,
    #[error("all {attempted} candidate files failed to load")]
    AllFailed { attempted: usize },
}

/// Errors surfaced by the selection state machine.
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("no document loaded")]
    NoDocument,
    #[error(transparent)]
    Load(#[from] SourceError),
}

/// Invalid effective configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("load_timeout must be at least 1 second")]
    ZeroTimeout,
    #[error("discovery_concurrency must be at least 1")]
    ZeroConcurrency,
    #[error("data location is empty")]
    EmptyDataLocation,
}

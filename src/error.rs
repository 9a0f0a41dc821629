// src/error.rs
// =============================================================================
// Error types for the crawler, the fetcher and the document store.
//
// Instead of one catch-all error, each layer gets its own enum:
// - FetchError: retrieving a single page failed
// - CrawlError: a crawl was aborted (wraps the FetchError and the page URL)
// - PersistenceError: writing or reading the document set failed
//
// FailureKind lets callers branch on *what* went wrong without matching on
// every variant or on error strings.
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// Broad category of a failure, for callers that only need to branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Fetch,
    Persistence,
    InvalidInput,
}

/// Failure while retrieving one page.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("invalid request header '{name}'")]
    InvalidHeader { name: String },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("too many redirects for {url}")]
    TooManyRedirects { url: String },

    #[error("could not resolve hostname for {url}")]
    Dns { url: String },

    #[error("TLS error for {url}: {reason}")]
    Tls { url: String, reason: String },

    #[error("connection to {url} failed: {reason}")]
    Connect { url: String, reason: String },

    #[error("request to {url} failed: {reason}")]
    Other { url: String, reason: String },
}

/// A crawl that could not run to completion.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("failed to crawl {url}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },
}

impl CrawlError {
    pub fn kind(&self) -> FailureKind {
        match self {
            CrawlError::Fetch { source, .. } => match source {
                FetchError::InvalidUrl { .. } | FetchError::InvalidHeader { .. } => {
                    FailureKind::InvalidInput
                }
                _ => FailureKind::Fetch,
            },
        }
    }
}

/// Failure while writing or reading objects in the document store.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not encode the document set")]
    Encode(#[source] serde_json::Error),

    #[error("could not decode the document set in {}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("file must be txt or pdf: {}", path.display())]
    UnsupportedFile { path: PathBuf },

    #[error("invalid object key '{key}'")]
    InvalidKey { key: String },
}

impl PersistenceError {
    pub fn kind(&self) -> FailureKind {
        match self {
            PersistenceError::UnsupportedFile { .. } | PersistenceError::InvalidKey { .. } => {
                FailureKind::InvalidInput
            }
            _ => FailureKind::Persistence,
        }
    }
}

// src/fetch/mod.rs
// =============================================================================
// This module is the crawler's only window onto the network.
//
// The crawler never talks to reqwest directly. It asks a `Fetcher` for the
// body of a URL, which means:
// - The real crawl uses HttpFetcher (reqwest)
// - Tests plug in an in-memory fetcher and never touch the network
//
// Submodules:
// - http: the reqwest-backed implementation
// =============================================================================

mod http;

#[cfg(test)]
pub mod fake;

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::FetchError;

pub use http::HttpFetcher;

/// Request headers sent with every page fetch (name -> value).
pub type Headers = BTreeMap<String, String>;

/// Browser-like User-Agent; many sites reject clients that do not identify.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
                                      (KHTML, like Gecko) Chrome/47.0.2526.80 Safari/537.36";

/// Headers used when the caller does not supply any.
pub fn default_headers() -> Headers {
    let mut headers = Headers::new();
    headers.insert("User-Agent".to_string(), DEFAULT_USER_AGENT.to_string());
    headers
}

/// Retrieves the raw body of a page.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str, headers: &Headers) -> Result<String, FetchError>;
}

#[async_trait]
impl<T: Fetcher + ?Sized> Fetcher for Arc<T> {
    async fn fetch(&self, url: &str, headers: &Headers) -> Result<String, FetchError> {
        (**self).fetch(url, headers).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_headers_identify_as_browser() {
        let headers = default_headers();
        assert_eq!(headers.len(), 1);
        let agent = &headers["User-Agent"];
        assert!(agent.starts_with("Mozilla/5.0 (X11; Linux x86_64)"));
        assert!(agent.ends_with("Safari/537.36"));
        assert!(!agent.contains("  "));
    }
}

// src/fetch/http.rs
// =============================================================================
// This module fetches pages over HTTP with reqwest.
//
// Key functionality:
// - Validates the URL before any request is made
// - Sends a GET with the caller's headers
// - Treats any non-2xx status as a failure
// - Sorts transport failures into timeout / DNS / TLS / redirect / connect
//
// There are no retries: a failed fetch is reported once and the crawler
// decides what to do with it.
// =============================================================================

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use std::time::Duration;
use url::Url;

use super::{Fetcher, Headers};
use crate::error::FetchError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_REDIRECTS: usize = 5;

/// reqwest-backed page fetcher.
///
/// The inner Client is reused for every request (connection pooling).
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> reqwest::Result<Self> {
        Self::with_timeout(REQUEST_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str, headers: &Headers) -> Result<String, FetchError> {
        let target = parse_page_url(url)?;
        let headers = to_header_map(headers)?;

        let response = self
            .client
            .get(target)
            .headers(headers)
            .send()
            .await
            .map_err(|e| categorize_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| categorize_error(url, e))
    }
}

// Only absolute http(s) URLs can be fetched
fn parse_page_url(url: &str) -> Result<Url, FetchError> {
    let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(FetchError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme '{}'", scheme),
        }),
    }
}

fn to_header_map(headers: &Headers) -> Result<HeaderMap, FetchError> {
    let mut map = HeaderMap::with_capacity(headers.len());

    for (name, value) in headers {
        let invalid = || FetchError::InvalidHeader { name: name.clone() };
        let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
        let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;
        map.insert(header_name, header_value);
    }

    Ok(map)
}

// Maps a reqwest error onto the FetchError variants
fn categorize_error(url: &str, error: reqwest::Error) -> FetchError {
    let url = url.to_string();
    let error_string = error.to_string();

    if error.is_timeout() {
        FetchError::Timeout { url }
    } else if error.is_redirect() {
        FetchError::TooManyRedirects { url }
    } else if error.is_connect() {
        // Connection errors often mean DNS issues or an unreachable host
        if error_string.contains("dns") {
            FetchError::Dns { url }
        } else {
            FetchError::Connect {
                url,
                reason: error_string,
            }
        }
    } else if error_string.contains("certificate") || error_string.contains("ssl") {
        FetchError::Tls {
            url,
            reason: error_string,
        }
    } else {
        FetchError::Other {
            url,
            reason: error_string,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::default_headers;

    #[test]
    fn test_parse_page_url_accepts_http_and_https() {
        assert!(parse_page_url("http://a.test/page").is_ok());
        assert!(parse_page_url("https://a.test").is_ok());
    }

    #[test]
    fn test_parse_page_url_rejects_other_schemes() {
        let err = parse_page_url("ftp://a.test/file").unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
        assert!(err.to_string().contains("unsupported scheme 'ftp'"));
    }

    #[test]
    fn test_parse_page_url_rejects_relative() {
        assert!(matches!(
            parse_page_url("/general-questions"),
            Err(FetchError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_header_map_from_defaults() {
        let map = to_header_map(&default_headers()).unwrap();
        let agent = map.get("user-agent").and_then(|v| v.to_str().ok());
        assert!(agent.is_some_and(|a| a.starts_with("Mozilla/5.0")));
    }

    #[test]
    fn test_header_map_rejects_bad_name() {
        let mut headers = Headers::new();
        headers.insert("Bad Header".to_string(), "x".to_string());
        let err = to_header_map(&headers).unwrap_err();
        assert!(matches!(err, FetchError::InvalidHeader { name } if name == "Bad Header"));
    }

    #[tokio::test]
    async fn test_fetch_invalid_url_fails_before_request() {
        let fetcher = HttpFetcher::new().unwrap();
        let result = fetcher.fetch("not a url", &default_headers()).await;
        assert!(matches!(result, Err(FetchError::InvalidUrl { .. })));
    }
}

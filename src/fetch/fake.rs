// src/fetch/fake.rs
// In-memory Fetcher for tests: URL -> HTML, unknown URLs answer 404.
// Every request is recorded so tests can assert on fetch order.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use super::{Fetcher, Headers};
use crate::error::FetchError;

#[derive(Default)]
pub struct FakeWeb {
    pages: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
    headers_seen: Mutex<Vec<Headers>>,
}

impl FakeWeb {
    /// Adds a page titled with its URL whose body links to each of `links`.
    /// Link labels never repeat the href, as on most real pages.
    pub fn page(self, url: &str, links: &[&str]) -> Self {
        let anchors: Vec<String> = links
            .iter()
            .enumerate()
            .map(|(i, link)| format!(r#"<li><a href="{}">Link {}</a></li>"#, link, i + 1))
            .collect();
        let html = format!(
            "<html><body><h1>{}</h1><ul>{}</ul></body></html>",
            url,
            anchors.join("")
        );
        self.raw_page(url, &html)
    }

    pub fn raw_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn headers_seen(&self) -> Vec<Headers> {
        self.headers_seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for FakeWeb {
    async fn fetch(&self, url: &str, headers: &Headers) -> Result<String, FetchError> {
        self.requests.lock().unwrap().push(url.to_string());
        self.headers_seen.lock().unwrap().push(headers.clone());
        self.pages.get(url).cloned().ok_or(FetchError::Status {
            url: url.to_string(),
            status: 404,
        })
    }
}

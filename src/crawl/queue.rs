// src/crawl/queue.rs
// =============================================================================
// This module implements the bounded breadth-first crawl.
//
// How it works, for each seed URL in turn:
// 1. Start with the seed in a FIFO queue and the full depth budget
// 2. Take the next page; skip it if any earlier seed or page already got it
// 3. Fetch it, reduce the HTML to text and keep the text as a document
// 4. While depth budget remains, scan the text for "(http...)" links,
//    keep the ones matching the prefix and append them to the queue
// 5. Repeat until the queue is empty, then move on to the next seed
//
// The visited set lives for the whole call, so a page reachable from two
// seeds is fetched once. The documents come back in the order pages were
// visited.
//
// Rust concepts:
// - VecDeque: Double-ended queue for breadth-first crawling
// - Generics: the crawler works with any Fetcher (real HTTP or a fake)
// - Streams: fetching one level of pages with bounded concurrency
// =============================================================================

use futures::stream::{self, StreamExt, TryStreamExt};
use std::collections::VecDeque;
use tracing::{debug, info, warn};

use super::options::{CrawlOptions, DepthPolicy, FailurePolicy};
use super::visited::VisitedSet;
use crate::error::CrawlError;
use crate::fetch::{default_headers, Fetcher, Headers};
use crate::text::{find_links, html_to_text};

/// Bounded, prefix-filtered, cycle-safe web crawler.
pub struct Crawler<F> {
    fetcher: F,
}

impl<F: Fetcher> Crawler<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Crawls every seed and returns one plain-text document per page
    /// visited, in visit order.
    ///
    /// Empty `seeds` give an empty document set. With
    /// `FailurePolicy::Abort` the first fetch failure ends the crawl.
    pub async fn crawl(
        &self,
        seeds: &[String],
        options: &CrawlOptions,
    ) -> Result<Vec<String>, CrawlError> {
        info!("Number of urls: {}.", seeds.len());

        let fallback;
        let headers = match &options.headers {
            Some(headers) => headers,
            None => {
                fallback = default_headers();
                &fallback
            }
        };

        let mut visited = VisitedSet::new();
        let mut documents = Vec::new();

        for seed in seeds {
            match options.depth_policy {
                DepthPolicy::PerPage => {
                    self.crawl_per_page(seed, options, headers, &mut visited, &mut documents)
                        .await?
                }
                DepthPolicy::PerLevel => {
                    self.crawl_per_level(seed, options, headers, &mut visited, &mut documents)
                        .await?
                }
            }
        }

        info!(
            visited = visited.len(),
            "Number of documents: {}.",
            documents.len()
        );
        Ok(documents)
    }

    // The depth budget is spent once for every page whose links get queued
    async fn crawl_per_page(
        &self,
        seed: &str,
        options: &CrawlOptions,
        headers: &Headers,
        visited: &mut VisitedSet,
        documents: &mut Vec<String>,
    ) -> Result<(), CrawlError> {
        let mut queue = VecDeque::from([seed.to_string()]);
        let mut depth = options.max_depth;

        while let Some(page) = queue.pop_front() {
            if !visited.insert(&page) {
                debug!("Skipping {} as it has already been crawled", page);
                continue;
            }

            let Some(text) = self.visit(&page, headers, options.failure_policy).await? else {
                continue;
            };

            if depth > 0 {
                let links = find_links(&text, options.link_prefix.as_deref());
                info!("Found {} pages to crawl.", links.len());
                queue.extend(links);
                depth -= 1;
            }

            documents.push(text);
        }

        Ok(())
    }

    // The depth budget is spent once per breadth-first level
    async fn crawl_per_level(
        &self,
        seed: &str,
        options: &CrawlOptions,
        headers: &Headers,
        visited: &mut VisitedSet,
        documents: &mut Vec<String>,
    ) -> Result<(), CrawlError> {
        let mut level = vec![seed.to_string()];
        let mut depth = options.max_depth;

        while !level.is_empty() {
            // Claim the whole level before fetching so concurrent fetches
            // can never pick up the same page twice
            let pages: Vec<String> = level
                .into_iter()
                .filter(|page| {
                    let fresh = visited.insert(page);
                    if !fresh {
                        debug!("Skipping {} as it has already been crawled", page);
                    }
                    fresh
                })
                .collect();

            let texts: Vec<Option<String>> = stream::iter(
                pages
                    .iter()
                    .map(|page| self.visit(page, headers, options.failure_policy)),
            )
            .buffered(options.concurrency.max(1))
            .try_collect()
            .await?;

            let mut next = Vec::new();
            for text in texts.into_iter().flatten() {
                if depth > 0 {
                    next.extend(find_links(&text, options.link_prefix.as_deref()));
                }
                documents.push(text);
            }

            if depth == 0 {
                break;
            }
            info!("Found {} pages to crawl.", next.len());
            depth -= 1;
            level = next;
        }

        Ok(())
    }

    // Fetches one page and reduces it to text.
    // Ok(None) means the page failed and the policy says to skip it.
    async fn visit(
        &self,
        url: &str,
        headers: &Headers,
        policy: FailurePolicy,
    ) -> Result<Option<String>, CrawlError> {
        info!("Crawling {}", url);

        match self.fetcher.fetch(url, headers).await {
            Ok(body) => Ok(Some(html_to_text(&body))),
            Err(source) => match policy {
                FailurePolicy::Abort => Err(CrawlError::Fetch {
                    url: url.to_string(),
                    source,
                }),
                FailurePolicy::Skip => {
                    warn!(error = %source, "Skipping {} as it could not be fetched", url);
                    Ok(None)
                }
            },
        }
    }
}

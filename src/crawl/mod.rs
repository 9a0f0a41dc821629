// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Breadth-first crawling from one or more seed URLs
// - Optional prefix filter that keeps the crawl inside one site
// - Depth budget per seed, spent per page (default) or per level
// - Each page fetched at most once per crawl, even across seeds
// - Abort-on-failure (default) or skip-and-continue
//
// The crawler has no side effects beyond HTTP requests: it hands back the
// documents and leaves storing them to the caller.
// =============================================================================

mod options;
mod queue;
mod visited;

pub use options::{CrawlOptions, DepthPolicy, FailurePolicy};
pub use queue::Crawler;

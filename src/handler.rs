// src/handler.rs
// =============================================================================
// Entry point for externally triggered crawls.
//
// A trigger sends a small JSON payload, every key optional:
//   { "url": "...", "depth": 1, 1.0 or "1", "level_prefix": "..." }
//
// The handler:
// 1. Fills in defaults for missing keys
// 2. Crawls the single seed URL
// 3. Stores the documents as a JSON array in the configured bucket
// 4. Answers { "status": 200 | 500, "message": "..." }
//
// Failures never escape as errors: they come back as status 500 with the
// whole error chain in the message so the caller can see what happened.
// =============================================================================

use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::config::{HandlerDefaults, StoreConfig};
use crate::crawl::{CrawlOptions, Crawler};
use crate::fetch::Fetcher;
use crate::store::{persist_documents, ObjectStore};

/// Trigger payload. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerEvent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<DepthValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level_prefix: Option<String>,
}

/// Depth arrives as a JSON integer or a numeric string. Any other JSON
/// value is kept as-is so a bad depth is answered with status 500 instead
/// of failing the payload decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DepthValue {
    Number(i64),
    Text(String),
    Other(serde_json::Value),
}

impl DepthValue {
    fn to_depth(&self) -> anyhow::Result<usize> {
        let depth = match self {
            DepthValue::Number(n) => *n,
            DepthValue::Text(s) => s
                .trim()
                .parse::<i64>()
                .with_context(|| format!("invalid depth {:?}", s))?,
            // Whole floats such as 1.0 count; 1.5, booleans and objects don't
            DepthValue::Other(value) => match value.as_f64() {
                Some(f) if f.fract() == 0.0 && f.abs() <= i64::MAX as f64 => f as i64,
                _ => return Err(anyhow!("invalid depth {}", value)),
            },
        };

        usize::try_from(depth).map_err(|_| anyhow!("invalid depth {}: must not be negative", depth))
    }
}

/// Result reported back to the trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerResponse {
    pub status: u16,
    pub message: String,
}

impl HandlerResponse {
    pub fn is_success(&self) -> bool {
        self.status == 200
    }

    fn success(message: String) -> Self {
        Self {
            status: 200,
            message,
        }
    }

    // The Debug form of anyhow::Error prints the full "Caused by" chain
    fn failure(err: anyhow::Error) -> Self {
        let trace = format!("{:?}", err);
        error!("{}", trace);
        Self {
            status: 500,
            message: trace,
        }
    }
}

pub struct Handler<F, S> {
    crawler: Crawler<F>,
    store: S,
    config: StoreConfig,
    defaults: HandlerDefaults,
    // Template for every crawl; depth and prefix come from the event
    options: CrawlOptions,
}

impl<F: Fetcher, S: ObjectStore> Handler<F, S> {
    pub fn new(crawler: Crawler<F>, store: S, config: StoreConfig) -> Self {
        Self {
            crawler,
            store,
            config,
            defaults: HandlerDefaults::default(),
            options: CrawlOptions::default(),
        }
    }

    pub fn with_options(mut self, options: CrawlOptions) -> Self {
        self.options = options;
        self
    }

    pub async fn handle(&self, event: TriggerEvent) -> HandlerResponse {
        let url = event.url.unwrap_or_else(|| self.defaults.url.clone());
        let level_prefix = event
            .level_prefix
            .unwrap_or_else(|| self.defaults.level_prefix.clone());
        let depth = match event.depth.as_ref().map(DepthValue::to_depth) {
            None => self.defaults.depth,
            Some(Ok(depth)) => depth,
            Some(Err(err)) => return HandlerResponse::failure(err),
        };

        let options = CrawlOptions {
            max_depth: depth,
            link_prefix: Some(level_prefix),
            ..self.options.clone()
        };

        info!("Crawling {} to depth of {}...", url, depth);
        let documents = match self.crawler.crawl(&[url.clone()], &options).await {
            Ok(documents) => {
                info!("Crawling {} to depth of {} succeeded", url, depth);
                documents
            }
            Err(err) => {
                error!(kind = ?err.kind(), "An error occurred during the crawl of {}.", url);
                return HandlerResponse::failure(err.into());
            }
        };

        match persist_documents(&self.store, &self.config, &documents).await {
            Ok(stored) => HandlerResponse::success(format!(
                "Successfully put {} to {}",
                stored.key, stored.bucket
            )),
            Err(err) => HandlerResponse::failure(
                anyhow::Error::new(err).context("failed to store the crawl results"),
            ),
        }
    }
}

// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Subcommands:
// - crawl:  crawl seed URLs and print the documents
// - invoke: run the trigger handler (crawl + store) with a payload
// - upload: put a .txt or .pdf file into the bucket
// - show:   print the document set stored by the last invoke
//
// Store settings can come from flags or from EZ_* environment variables.
// =============================================================================

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{StoreConfig, DEFAULT_ARTIFACT_NAME, DEFAULT_BUCKET_PREFIX};
use crate::crawl::{CrawlOptions, DepthPolicy, FailurePolicy};

#[derive(Parser, Debug)]
#[command(
    name = "ez-web-loader",
    version = "0.1.0",
    about = "Crawl a website into a plain-text corpus",
    long_about = "ez-web-loader crawls one or more seed URLs breadth-first, turns every page \
                  into plain text and stores the result as a JSON array of documents, \
                  ready to be indexed for retrieval."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl seed URLs and print the documents
    ///
    /// Example: ez-web-loader crawl https://example.com --depth 1 --prefix https://example.com/
    Crawl {
        /// Seed URLs, crawled in the order given
        #[arg(required = true)]
        urls: Vec<String>,

        /// Link-expansion budget per seed (0 = seeds only)
        #[arg(long, default_value_t = 0)]
        depth: usize,

        /// Only follow links that start with this prefix
        #[arg(long)]
        prefix: Option<String>,

        /// Request header as "Name: value"; replaces the default User-Agent.
        /// Can be repeated.
        #[arg(long = "header", value_parser = parse_header)]
        headers: Vec<(String, String)>,

        #[command(flatten)]
        policy: PolicyArgs,

        /// Print the documents as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Run the trigger handler: crawl one URL and store the documents
    ///
    /// Example: ez-web-loader invoke --url https://example.com/faq --depth 1 --account-id 1234
    Invoke {
        /// The URL to process
        #[arg(long)]
        url: Option<String>,

        /// The depth of the crawl
        #[arg(long)]
        depth: Option<String>,

        /// The prefix that any links must contain to crawl
        #[arg(long)]
        level_prefix: Option<String>,

        /// Raw JSON payload, e.g. '{"url": "...", "depth": "2"}'
        #[arg(long, conflicts_with_all = ["url", "depth", "level_prefix"])]
        payload: Option<String>,

        #[command(flatten)]
        policy: PolicyArgs,

        #[command(flatten)]
        store: StoreArgs,
    },

    /// Upload a .txt or .pdf file into the bucket
    Upload {
        /// /path/to/your/file
        path: PathBuf,

        #[command(flatten)]
        store: StoreArgs,
    },

    /// Print the stored crawl results
    Show {
        #[command(flatten)]
        store: StoreArgs,

        /// Print the documents as a JSON array
        #[arg(long)]
        json: bool,
    },
}

/// How a crawl spends its depth budget and reacts to failures.
#[derive(Args, Debug, Clone)]
pub struct PolicyArgs {
    /// per-page: depth is spent per expanded page; per-level: per BFS level
    #[arg(long, value_enum, default_value_t = DepthPolicy::PerPage)]
    pub depth_policy: DepthPolicy,

    /// abort: first failed page stops the crawl; skip: log it and continue
    #[arg(long, value_enum, default_value_t = FailurePolicy::Abort)]
    pub on_error: FailurePolicy,

    /// Pages of one level fetched at once (per-level only)
    #[arg(long, default_value_t = 1)]
    pub concurrency: usize,
}

impl PolicyArgs {
    pub fn apply(&self, options: CrawlOptions) -> CrawlOptions {
        options
            .with_depth_policy(self.depth_policy)
            .with_failure_policy(self.on_error)
            .with_concurrency(self.concurrency)
    }
}

/// Where documents are stored.
#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    /// Directory holding one folder per bucket
    #[arg(long, env = "EZ_STORE_ROOT", default_value = "buckets")]
    pub store_root: PathBuf,

    /// Account identity the bucket name is derived from
    #[arg(long, env = "EZ_ACCOUNT_ID")]
    pub account_id: String,

    #[arg(long, env = "EZ_BUCKET_PREFIX", default_value = DEFAULT_BUCKET_PREFIX)]
    pub bucket_prefix: String,

    /// Object key for the crawl results
    #[arg(long, env = "EZ_ARTIFACT_NAME", default_value = DEFAULT_ARTIFACT_NAME)]
    pub artifact_name: String,
}

impl StoreArgs {
    pub fn to_config(&self) -> StoreConfig {
        StoreConfig {
            bucket_prefix: self.bucket_prefix.clone(),
            artifact_name: self.artifact_name.clone(),
            ..StoreConfig::new(&self.store_root, &self.account_id)
        }
    }
}

// "User-Agent: my-bot/1.0" -> ("User-Agent", "my-bot/1.0")
fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected \"Name: value\", got {:?}", raw))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing header name in {:?}", raw));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

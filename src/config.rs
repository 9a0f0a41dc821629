// src/config.rs
// =============================================================================
// Configuration objects.
//
// Everything the crawler and the handler need from the outside world is
// passed in through these structs when they are constructed. Nothing is
// looked up from global state at start-up, so tests can build a config
// pointing at a temporary directory and a made-up account id.
// =============================================================================

use std::path::PathBuf;

pub const DEFAULT_BUCKET_PREFIX: &str = "lexgenaistack-source-materials-bucket-";
pub const DEFAULT_ARTIFACT_NAME: &str = "web-crawl-results.txt";

pub const DEFAULT_URL: &str = "http://www.zappos.com/general-questions";
pub const DEFAULT_DEPTH: usize = 1;
pub const DEFAULT_LEVEL_PREFIX: &str = "https://www.zappos.com/";

/// Where crawl results are stored.
///
/// The bucket name is derived from the account identity:
///   bucket_prefix = "lexgenaistack-source-materials-bucket-"
///   account_id    = "123456789012"
///   bucket_name() = "lexgenaistack-source-materials-bucket-123456789012"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory that holds one sub-directory per bucket
    pub root: PathBuf,
    pub account_id: String,
    pub bucket_prefix: String,
    /// Object key the document set is written under
    pub artifact_name: String,
}

impl StoreConfig {
    pub fn new(root: impl Into<PathBuf>, account_id: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            account_id: account_id.into(),
            bucket_prefix: DEFAULT_BUCKET_PREFIX.to_string(),
            artifact_name: DEFAULT_ARTIFACT_NAME.to_string(),
        }
    }

    pub fn bucket_name(&self) -> String {
        format!("{}{}", self.bucket_prefix, self.account_id)
    }
}

/// Values used for trigger payload keys that are absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerDefaults {
    pub url: String,
    pub depth: usize,
    pub level_prefix: String,
}

impl Default for HandlerDefaults {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            depth: DEFAULT_DEPTH,
            level_prefix: DEFAULT_LEVEL_PREFIX.to_string(),
        }
    }
}

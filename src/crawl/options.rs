// src/crawl/options.rs
// =============================================================================
// Knobs for a single crawl call.
//
// The defaults reproduce the classic loader behaviour:
// - depth is spent once per expanded page (DepthPolicy::PerPage)
// - the first page that cannot be fetched aborts the crawl (FailurePolicy::Abort)
// - one request in flight at a time
// =============================================================================

use crate::fetch::Headers;

/// How the depth budget is consumed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum DepthPolicy {
    /// One unit of depth per page whose links are followed, at any level.
    ///
    /// With max_depth = 2 and a seed linking to x and y, the seed and x are
    /// expanded but y is not, even though x and y sit on the same level.
    #[default]
    PerPage,
    /// One unit of depth per breadth-first level: every page of a level is
    /// expanded while budget remains.
    PerLevel,
}

/// What happens when a page cannot be fetched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum FailurePolicy {
    /// Stop the whole crawl and return the error.
    #[default]
    Abort,
    /// Log the failure, leave the page out of the document set and continue.
    Skip,
}

#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// Link-expansion budget per seed; 0 fetches the seeds only.
    pub max_depth: usize,
    /// Only links starting with this string are followed.
    pub link_prefix: Option<String>,
    /// Request headers; `None` means the default browser User-Agent.
    pub headers: Option<Headers>,
    pub depth_policy: DepthPolicy,
    pub failure_policy: FailurePolicy,
    /// Pages of one level fetched at once. Only used by DepthPolicy::PerLevel.
    pub concurrency: usize,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            max_depth: 0,
            link_prefix: None,
            headers: None,
            depth_policy: DepthPolicy::default(),
            failure_policy: FailurePolicy::default(),
            concurrency: 1,
        }
    }
}

impl CrawlOptions {
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            ..Self::default()
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.link_prefix = Some(prefix.into());
        self
    }

    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn with_depth_policy(mut self, policy: DepthPolicy) -> Self {
        self.depth_policy = policy;
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }
}

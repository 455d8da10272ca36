// src/crawl/budget.rs
// =============================================================================
// The limits that keep a single crawl bounded.
//
// A crawl stops at whichever comes first:
// - max_pages pages fetched successfully
// - max_duration of wall-clock time
// - an empty frontier
//
// fetch_timeout caps every single request, so a crawl can overrun
// max_duration by at most one fetch.
// =============================================================================

use std::time::Duration;

pub const DEFAULT_MAX_PAGES: usize = 40;
pub const DEFAULT_MAX_DURATION: Duration = Duration::from_secs(30);
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlBudget {
    /// Pages fetched successfully before giving up
    pub max_pages: usize,
    /// Wall-clock time allowed for one crawl
    pub max_duration: Duration,
    /// Timeout applied to each individual GET
    pub fetch_timeout: Duration,
}

impl Default for CrawlBudget {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
            max_duration: DEFAULT_MAX_DURATION,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

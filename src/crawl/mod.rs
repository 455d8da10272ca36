// src/crawl/mod.rs
// =============================================================================
// This module handles website crawling.
//
// Features:
// - Breadth-first crawling starting from a URL plus common contact pages
// - Same-origin restriction (never wanders off to other sites)
// - Page and time budgets so every crawl finishes
// - Stops at the first page that contains an email
//
// Submodules:
// - budget: The limits a crawl runs under
// - fetcher: Downloads pages, turning every failure into "no page"
// - engine: The crawl loop itself
// =============================================================================

mod budget;
mod engine;
mod fetcher;

pub use budget::{CrawlBudget, DEFAULT_FETCH_TIMEOUT, DEFAULT_MAX_DURATION, DEFAULT_MAX_PAGES};
pub use engine::{CrawlReport, CrawlState, EmailCrawler};

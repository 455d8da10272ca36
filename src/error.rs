// src/error.rs
// =============================================================================
// Errors that can abort a whole crawl.
//
// Only a handful of things are fatal:
// - The target URL cannot be parsed, or is not http(s)
// - The target URL has no host to build an origin from
// - The HTTP client cannot be constructed
//
// Everything else (failed fetches, broken links, running out of budget) is
// absorbed by the crawl engine and never shows up here.
//
// Rust concepts:
// - thiserror: derive macro that implements std::error::Error for us
// - #[source]: keeps the underlying error so `anyhow` can print the chain
// =============================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrawlError {
    /// The caller-supplied URL is not a valid absolute URL
    #[error("Invalid URL '{url}': {source}")]
    InvalidTarget {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Only http:// and https:// sites can be crawled.
    /// Catches inputs like "example.com:8080", which parses with scheme "example.com"
    #[error("Unsupported URL scheme '{scheme}' in {url}")]
    UnsupportedScheme { url: String, scheme: String },

    /// The URL parsed, but there is no host to scope the crawl to
    #[error("URL has no host: {url}")]
    NoHost { url: String },

    /// The HTTP client could not be built
    #[error("Failed to create HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

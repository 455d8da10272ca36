// src/crawl/fetcher.rs
// =============================================================================
// This module downloads pages for the crawler.
//
// Key behaviour:
// - One GET per URL, no retries
// - A fixed User-Agent so site owners can tell who is visiting
// - A fixed timeout per request
// - Never returns an error: any failure just means "no page"
//
// Why swallow errors?
// - A dead /impressum link or a slow server shouldn't stop the search
// - The crawl engine treats a missing page exactly like a page with no
//   emails on it and moves on to the next URL
// =============================================================================

use reqwest::Client;
use std::time::Duration;
use url::Url;

use crate::error::CrawlError;

pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; EmailScout/1.0)";

// Thin wrapper around a reqwest Client
//
// Clone is cheap (Client is reference counted internally), so one fetcher
// can be shared by many concurrent crawls.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    // Builds a fetcher whose requests all time out after `timeout`
    pub fn new(timeout: Duration) -> Result<Self, CrawlError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self { client })
    }

    // Fetches a page and returns its body
    //
    // Returns:
    //   Some(html) for a 2xx response with a non-empty body
    //   None for timeouts, connection errors, non-2xx statuses,
    //   unreadable or empty bodies
    pub async fn fetch(&self, url: &Url) -> Option<String> {
        let response = match self.client.get(url.as_str()).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!("Fetch failed for {}: {}", url, describe_error(&e));
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("Fetch failed for {}: HTTP {}", url, status.as_u16());
            return None;
        }

        match response.text().await {
            Ok(body) if body.is_empty() => {
                tracing::debug!("Empty body at {}", url);
                None
            }
            Ok(body) => Some(body),
            Err(e) => {
                tracing::debug!("Could not read body of {}: {}", url, describe_error(&e));
                None
            }
        }
    }
}

// Short human-readable reason for a failed request (for logs only)
fn describe_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "request timed out".to_string()
    } else if error.is_connect() {
        "connection failed".to_string()
    } else if error.is_redirect() {
        "too many redirects".to_string()
    } else {
        error.to_string()
    }
}

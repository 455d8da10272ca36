// src/extract/links.rs
// =============================================================================
// This module extracts crawlable links from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// We also use the `url` crate to:
// - Resolve relative links against the site's origin
// - Compare origins so the crawl never leaves the target site
//
// Rust concepts:
// - Option<T>: a link that can't be used simply becomes None
// - LazyLock: build the CSS selector once, reuse it for every page
// =============================================================================

use scraper::{Html, Selector};
use std::sync::LazyLock;
use url::Url;

static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("anchor selector is valid"));

// Values that technically parse but never lead anywhere useful
const DEGENERATE_HREFS: &[&str] = &["", "/", "http://", "https://", "//"];

// Extracts same-origin links from HTML content
//
// Parameters:
//   html: the HTML content to parse (borrowed as &str)
//   origin: the crawl's origin (scheme + host), used both to resolve
//           relative links and to decide which links stay in scope
//
// Returns: Vec<Url> of absolute URLs on the same origin, in document order.
//          Duplicates are kept; the crawl engine dedups when it visits.
//
// Example:
//   html   = "<a href='/about#team'>About</a><a href='https://other.com'>x</a>"
//   origin = "https://example.com"
//   result = ["https://example.com/about"]
pub fn extract_links(html: &str, origin: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);

    document
        .select(&ANCHOR_SELECTOR)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(origin, href))
        .filter(|url| is_same_origin(url, origin))
        .collect()
}

// Turns one href into an absolute URL, or None if it should be skipped
//
// Examples (origin = "https://example.com"):
//   "/contact#form"      -> Some("https://example.com/contact")
//   "team.html"          -> Some("https://example.com/team.html")
//   "mailto:a@b.com"     -> None (not a page)
//   "javascript:void(0)" -> None
//   "/"                  -> None (the homepage is already seeded)
//   "http://[broken"     -> None (malformed, dropped on its own)
fn resolve_link(origin: &Url, href: &str) -> Option<Url> {
    // Drop the fragment first: "/about#team" and "/about" are the same page
    let href = href.split('#').next().unwrap_or_default().trim();

    if href.starts_with("mailto:") || href.starts_with("javascript:") {
        return None;
    }
    if DEGENERATE_HREFS.contains(&href) {
        return None;
    }

    match origin.join(href) {
        Ok(url) => Some(url),
        Err(e) => {
            tracing::debug!("Skipping malformed link '{}': {}", href, e);
            None
        }
    }
}

// Checks whether a resolved URL belongs to the crawl's origin
//
// This compares scheme, host and port structurally. A plain string-prefix
// test would also accept "http://a.com.evil.net" for origin "http://a.com".
//
// Url::origin() ignores userinfo, so "https://someone@example.com/contact"
// is rejected separately: it isn't prefixed by the origin string and would
// be fetched a second time, with credentials attached.
fn is_same_origin(url: &Url, origin: &Url) -> bool {
    if has_credentials(url) {
        return false;
    }
    url.origin() == origin.origin()
}

fn has_credentials(url: &Url) -> bool {
    !url.username().is_empty() || url.password().is_some()
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why resolve against the origin and not the current page?
//    - Every link is joined onto "https://example.com", so "team.html"
//      becomes "https://example.com/team.html" wherever it was found
//    - Absolute paths ("/about") and full URLs behave the same either way
//
// 2. What is Url::origin()?
//    - The (scheme, host, port) triple of a URL
//    - "https://example.com/a" and "https://example.com:443/b" share an origin
//    - "http://example.com" and "https://example.com" do NOT
//
// 3. Why filter_map?
//    - It maps and filters in one step: closures return Option<T>,
//      None values are dropped, Some values are unwrapped
// -----------------------------------------------------------------------------

// src/crawl/engine.rs
// =============================================================================
// This module implements the email hunt as a breadth-first crawl.
//
// How it works:
// 1. Parse the target URL and derive its origin (scheme + host)
// 2. Seed the queue with the target, then the usual contact/about pages
// 3. Pop the next URL, fetch it, look for emails
// 4. Emails found? Stop right there and report them
// 5. No emails? Queue the page's same-origin links and keep going
// 6. Stop early when the page or time budget runs out
//
// Why contact pages first?
// - "/contact" and "/about" are where addresses usually live
// - Queuing them right after the homepage means they are tried before
//   whatever the homepage happens to link to
//
// Rust concepts:
// - VecDeque: FIFO queue for breadth-first crawling
// - HashSet: remembers which URLs have already been fetched
// - Enums: the crawl's terminal state is an explicit value
// =============================================================================

use serde::Serialize;
use std::collections::{HashSet, VecDeque};
use std::time::Instant;
use url::Url;

use super::budget::CrawlBudget;
use super::fetcher::PageFetcher;
use crate::error::CrawlError;
use crate::extract::{extract_emails, extract_links};

// Paths tried right after the target page, resolved against the origin
pub const CONTACT_PATHS: &[&str] = &[
    "/contact",
    "/contact-us",
    "/contactus",
    "/about",
    "/about-us",
    "/aboutus",
    "/impressum",
];

// The site being crawled
//
// `origin` is the target with everything after the host stripped, e.g.
//   url    = https://example.com/shop/index.html
//   origin = https://example.com/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTarget {
    pub url: Url,
    pub origin: Url,
}

impl CrawlTarget {
    // Parses a caller-supplied URL
    //
    // Fails for anything we can't scope a crawl to: unparseable input,
    // missing scheme, non-http(s) schemes and host-less URLs.
    pub fn parse(input: &str) -> Result<Self, CrawlError> {
        let input = input.trim();
        let url = Url::parse(input).map_err(|source| CrawlError::InvalidTarget {
            url: input.to_string(),
            source,
        })?;

        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(CrawlError::UnsupportedScheme {
                url: input.to_string(),
                scheme: url.scheme().to_string(),
            });
        }

        // ascii_serialization gives "scheme://host[:port]" for http(s) URLs
        let origin = url.origin();
        if !origin.is_tuple() {
            return Err(CrawlError::NoHost {
                url: input.to_string(),
            });
        }
        let origin = Url::parse(&origin.ascii_serialization()).map_err(|source| {
            CrawlError::InvalidTarget {
                url: input.to_string(),
                source,
            }
        })?;

        Ok(Self { url, origin })
    }

    // The frontier a crawl starts with: the target page first,
    // then every contact path on the same origin
    pub fn seeds(&self) -> VecDeque<Url> {
        let mut seeds = VecDeque::with_capacity(CONTACT_PATHS.len() + 1);
        seeds.push_back(self.url.clone());

        for path in CONTACT_PATHS {
            match self.origin.join(path) {
                Ok(url) => seeds.push_back(url),
                Err(e) => tracing::warn!("Could not build seed {}{}: {}", self.origin, path, e),
            }
        }

        seeds
    }
}

// How a crawl ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CrawlState {
    /// A page yielded at least one email
    Succeeded,
    /// The frontier ran dry or the page budget was used up, nothing found
    Exhausted,
    /// The time budget ran out first
    TimedOut,
}

// Everything a finished crawl has to say
#[derive(Debug, Clone, Serialize)]
pub struct CrawlReport {
    /// The target URL, normalized
    pub target: String,
    /// Terminal state of the crawl
    pub state: CrawlState,
    /// Distinct emails from the first page that had any (possibly empty)
    pub emails: Vec<String>,
    /// Pages fetched successfully (counts against the page budget)
    pub pages_fetched: usize,
    /// Every URL a fetch was attempted for, in order
    pub visited: Vec<String>,
    /// Wall-clock duration of the crawl in milliseconds
    pub elapsed_ms: u64,
}

impl CrawlReport {
    /// True when the crawl found at least one email
    pub fn found(&self) -> bool {
        self.state == CrawlState::Succeeded
    }
}

// Runs crawls with fixed budgets
//
// Holds no per-crawl state, so one EmailCrawler can serve many concurrent
// crawls (the HTTP server shares a single instance).
#[derive(Debug, Clone)]
pub struct EmailCrawler {
    fetcher: PageFetcher,
    budget: CrawlBudget,
}

impl EmailCrawler {
    pub fn new(budget: CrawlBudget) -> Result<Self, CrawlError> {
        let fetcher = PageFetcher::new(budget.fetch_timeout)?;
        Ok(Self { fetcher, budget })
    }

    pub fn budget(&self) -> CrawlBudget {
        self.budget
    }

    // Crawls a website looking for a contact email
    //
    // Parameters:
    //   target: the website URL, e.g. "https://example.com"
    //
    // Returns:
    //   Ok(report) for every crawl that got started, even if nothing was found
    //   Err(...) only when the target URL is unusable (nothing is fetched)
    pub async fn crawl(&self, target: &str) -> Result<CrawlReport, CrawlError> {
        let target = CrawlTarget::parse(target)?;
        Ok(self.crawl_target(&target).await)
    }

    pub async fn crawl_target(&self, target: &CrawlTarget) -> CrawlReport {
        let start = Instant::now();
        tracing::info!("Starting crawl of {} (origin {})", target.url, target.origin);

        let mut frontier = target.seeds();
        let mut visited: HashSet<String> = HashSet::new();
        let mut visit_order: Vec<String> = Vec::new();
        let mut emails: Vec<String> = Vec::new();
        let mut pages_fetched = 0;
        let mut timed_out = false;

        // Finding an email breaks out directly, so only time, pages
        // and the frontier are checked at the top
        loop {
            if start.elapsed() > self.budget.max_duration {
                tracing::warn!("Crawl time exceeded for {}", target.url);
                timed_out = true;
                break;
            }
            if pages_fetched >= self.budget.max_pages {
                tracing::debug!("Page budget of {} reached", self.budget.max_pages);
                break;
            }
            let Some(url) = frontier.pop_front() else {
                break;
            };

            // A URL may sit in the frontier several times; only the first pop fetches it
            if !visited.insert(url.as_str().to_string()) {
                continue;
            }
            visit_order.push(url.as_str().to_string());

            tracing::debug!("Crawling [{} pages so far]: {}", pages_fetched, url);

            let Some(html) = self.fetcher.fetch(&url).await else {
                continue;
            };
            pages_fetched += 1;

            let found = extract_emails(&html);
            if !found.is_empty() {
                tracing::info!("Found {} email(s) on {}", found.len(), url);
                emails = found;
                break;
            }

            for link in extract_links(&html, &target.origin) {
                if !visited.contains(link.as_str()) {
                    frontier.push_back(link);
                }
            }
        }

        let state = terminal_state(timed_out, &emails);
        let elapsed = start.elapsed();
        tracing::info!(
            "Crawl of {} finished: {:?} after {} page(s) in {:?}",
            target.url,
            state,
            pages_fetched,
            elapsed
        );

        CrawlReport {
            target: target.url.to_string(),
            state,
            emails,
            pages_fetched,
            visited: visit_order,
            elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

fn terminal_state(timed_out: bool, emails: &[String]) -> CrawlState {
    if !emails.is_empty() {
        CrawlState::Succeeded
    } else if timed_out {
        CrawlState::TimedOut
    } else {
        CrawlState::Exhausted
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why `let Some(x) = ... else { ... };`?
//    - "let-else" binds x when the pattern matches, otherwise runs the else
//      block, which must leave the loop or function (break/continue/return)
//    - Keeps the happy path unindented
//
// 2. Why is `visited` checked when popping instead of when pushing?
//    - A page can be linked from many places before it gets crawled
//    - Checking at pop time guarantees each URL is fetched once, no matter
//      how many copies ended up in the queue
//
// 3. Why &self and not &mut self on crawl()?
//    - All per-crawl state (queue, visited set, counters) lives in local
//      variables, so several crawls can run at the same time on one crawler
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn crawler(max_pages: usize, max_duration: Duration) -> EmailCrawler {
        EmailCrawler::new(CrawlBudget {
            max_pages,
            max_duration,
            fetch_timeout: Duration::from_secs(2),
        })
        .unwrap()
    }

    fn default_crawler() -> EmailCrawler {
        crawler(40, Duration::from_secs(30))
    }

    fn html_page(body: &str) -> ResponseTemplate {
        ResponseTemplate::new(200)
            .insert_header("content-type", "text/html")
            .set_body_string(format!("<html><body>{}</body></html>", body))
    }

    async fn mount_page(server: &MockServer, route: &str, body: &str) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(html_page(body))
            .mount(server)
            .await;
    }

    fn assert_no_duplicate_visits(report: &CrawlReport) {
        let unique: HashSet<&String> = report.visited.iter().collect();
        assert_eq!(unique.len(), report.visited.len(), "visited: {:?}", report.visited);
    }

    #[test]
    fn test_target_origin_drops_path_and_query() {
        let target = CrawlTarget::parse("https://example.com/shop/index.html?x=1").unwrap();
        assert_eq!(target.url.as_str(), "https://example.com/shop/index.html?x=1");
        assert_eq!(target.origin.as_str(), "https://example.com/");
    }

    #[test]
    fn test_target_origin_keeps_port() {
        let target = CrawlTarget::parse("  http://localhost:8080/a ").unwrap();
        assert_eq!(target.origin.as_str(), "http://localhost:8080/");
    }

    #[test]
    fn test_seeds_start_with_target_then_contact_paths() {
        let target = CrawlTarget::parse("https://example.com/home").unwrap();
        let seeds: Vec<String> = target.seeds().into_iter().map(String::from).collect();
        assert_eq!(
            seeds,
            vec![
                "https://example.com/home",
                "https://example.com/contact",
                "https://example.com/contact-us",
                "https://example.com/contactus",
                "https://example.com/about",
                "https://example.com/about-us",
                "https://example.com/aboutus",
                "https://example.com/impressum",
            ]
        );
    }

    #[test]
    fn test_target_without_scheme_is_rejected() {
        assert!(matches!(
            CrawlTarget::parse("example.com"),
            Err(CrawlError::InvalidTarget { .. })
        ));
    }

    #[test]
    fn test_non_http_target_is_rejected() {
        assert!(matches!(
            CrawlTarget::parse("ftp://example.com"),
            Err(CrawlError::UnsupportedScheme { .. })
        ));
        assert!(matches!(
            CrawlTarget::parse("example.com:8080"),
            Err(CrawlError::UnsupportedScheme { .. })
        ));
    }

    #[test]
    fn test_terminal_state() {
        let some = vec!["a@b.co".to_string()];
        assert_eq!(terminal_state(false, &some), CrawlState::Succeeded);
        assert_eq!(terminal_state(false, &[]), CrawlState::Exhausted);
        assert_eq!(terminal_state(true, &[]), CrawlState::TimedOut);
    }

    #[tokio::test]
    async fn test_email_on_first_page_stops_immediately() {
        let server = MockServer::start().await;
        mount_page(&server, "/", "Contact us at sales@example.com.").await;
        Mock::given(method("GET"))
            .and(path("/contact"))
            .respond_with(html_page("other@example.com"))
            .expect(0)
            .mount(&server)
            .await;

        let report = default_crawler().crawl(&server.uri()).await.unwrap();

        assert_eq!(report.state, CrawlState::Succeeded);
        assert!(report.found());
        assert_eq!(report.emails, vec!["sales@example.com"]);
        assert_eq!(report.pages_fetched, 1);
        assert_eq!(report.visited, vec![format!("{}/", server.uri())]);
    }

    #[tokio::test]
    async fn test_email_on_linked_about_page() {
        let server = MockServer::start().await;
        mount_page(&server, "/", r#"<a href="/about">About</a>"#).await;
        mount_page(&server, "/about", "Write to info@example.org").await;

        let report = default_crawler().crawl(&server.uri()).await.unwrap();

        assert_eq!(report.state, CrawlState::Succeeded);
        assert_eq!(report.emails, vec!["info@example.org"]);
        assert_eq!(report.pages_fetched, 2);
        assert!(report.visited.contains(&format!("{}/", server.uri())));
        assert_eq!(report.visited.last(), Some(&format!("{}/about", server.uri())));
        assert_no_duplicate_visits(&report);
    }

    #[tokio::test]
    async fn test_follows_discovered_links_after_seeds() {
        let server = MockServer::start().await;
        mount_page(&server, "/", r#"<a href="/team#staff">Team</a>"#).await;
        mount_page(&server, "/team", r#"<a href="mailto:jane@example.net">Jane</a>"#).await;

        let report = default_crawler().crawl(&server.uri()).await.unwrap();

        assert_eq!(report.emails, vec!["jane@example.net"]);
        // homepage, 7 contact paths (all 404), then the discovered link
        assert_eq!(report.visited.len(), 1 + CONTACT_PATHS.len() + 1);
        assert_eq!(report.visited.last(), Some(&format!("{}/team", server.uri())));
        assert_eq!(report.pages_fetched, 2);
    }

    #[tokio::test]
    async fn test_asset_filenames_are_not_emails() {
        let server = MockServer::start().await;
        mount_page(
            &server,
            "/",
            r#"<a href="/img/logo@2x.png">Logo</a><p>banner.jpg</p>"#,
        )
        .await;

        let report = default_crawler().crawl(&server.uri()).await.unwrap();

        assert_eq!(report.state, CrawlState::Exhausted);
        assert!(report.emails.is_empty());
        // the image link is same-origin, so it gets tried too; every
        // failed fetch is visited but doesn't count as a page
        assert_eq!(report.pages_fetched, 1);
        assert_eq!(report.visited.len(), 1 + CONTACT_PATHS.len() + 1);
    }

    #[tokio::test]
    async fn test_page_budget_exhausted_without_email() {
        let server = MockServer::start().await;
        let links: String = (0..60)
            .map(|i| format!(r#"<a href="/p/{}">page {}</a>"#, i, i))
            .collect();
        mount_page(&server, "/", &links).await;
        Mock::given(method("GET"))
            .and(path_regex(r"^/p/\d+$"))
            .respond_with(html_page("<p>No contact details here</p>"))
            .mount(&server)
            .await;

        let report = default_crawler().crawl(&server.uri()).await.unwrap();

        assert_eq!(report.state, CrawlState::Exhausted);
        assert!(report.emails.is_empty());
        assert_eq!(report.pages_fetched, 40);
        assert_eq!(report.visited.len(), 1 + CONTACT_PATHS.len() + 39);
        assert_no_duplicate_visits(&report);
    }

    #[tokio::test]
    async fn test_self_linking_page_is_fetched_once() {
        let server = MockServer::start().await;
        mount_page(&server, "/", r#"<a href="/loop">Loop</a>"#).await;
        Mock::given(method("GET"))
            .and(path("/loop"))
            .respond_with(html_page(
                r#"<a href="/loop">again</a><a href="/loop#x">and again</a><a href="/">home</a>"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let report = default_crawler().crawl(&server.uri()).await.unwrap();

        assert_eq!(report.state, CrawlState::Exhausted);
        assert_eq!(report.pages_fetched, 2);
        assert_no_duplicate_visits(&report);
    }

    #[tokio::test]
    async fn test_credentialed_copy_of_a_link_is_not_fetched() {
        let server = MockServer::start().await;
        let address = server.address().to_string();
        let body = format!(
            r#"<a href="/team">Team</a><a href="http://someone@{}/team">Team again</a>"#,
            address
        );
        mount_page(&server, "/", &body).await;
        Mock::given(method("GET"))
            .and(path("/team"))
            .respond_with(html_page("<p>Our people</p>"))
            .expect(1)
            .mount(&server)
            .await;

        let report = default_crawler().crawl(&server.uri()).await.unwrap();

        assert_eq!(report.state, CrawlState::Exhausted);
        assert_eq!(report.pages_fetched, 2);
        assert!(report.visited.iter().all(|url| !url.contains('@')));
        assert_no_duplicate_visits(&report);
    }

    #[tokio::test]
    async fn test_time_budget_stops_crawl() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(
                html_page(r#"<a href="/next">Next</a>"#).set_delay(Duration::from_millis(300)),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/contact"))
            .respond_with(html_page("late@example.com"))
            .expect(0)
            .mount(&server)
            .await;

        let report = crawler(40, Duration::from_millis(100))
            .crawl(&server.uri())
            .await
            .unwrap();

        assert_eq!(report.state, CrawlState::TimedOut);
        assert!(report.emails.is_empty());
        assert_eq!(report.pages_fetched, 1);
        assert_eq!(report.visited.len(), 1);
    }

    #[tokio::test]
    async fn test_links_to_other_origins_are_not_followed() {
        let other = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(html_page("stranger@elsewhere.com"))
            .expect(0)
            .mount(&other)
            .await;

        let server = MockServer::start().await;
        let body = format!(r#"<a href="{}/contact">Partner</a>"#, other.uri());
        mount_page(&server, "/", &body).await;

        let report = default_crawler().crawl(&server.uri()).await.unwrap();

        assert_eq!(report.state, CrawlState::Exhausted);
        assert!(report
            .visited
            .iter()
            .all(|url| url.starts_with(&server.uri())));
    }

    #[tokio::test]
    async fn test_invalid_target_fails_before_fetching() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(html_page("a@example.com"))
            .expect(0)
            .mount(&server)
            .await;

        // "127.0.0.1:port" with the scheme left off
        let address = server.address().to_string();
        let result = default_crawler().crawl(&address).await;

        assert!(matches!(result, Err(CrawlError::InvalidTarget { .. })));
    }

    #[tokio::test]
    async fn test_independent_crawls_run_concurrently() {
        let first = MockServer::start().await;
        mount_page(&first, "/", "one@first.com").await;
        let second = MockServer::start().await;
        mount_page(&second, "/", "two@second.com").await;

        let (first_uri, second_uri) = (first.uri(), second.uri());
        let crawler = default_crawler();
        let (a, b) = tokio::join!(crawler.crawl(&first_uri), crawler.crawl(&second_uri));

        assert_eq!(a.unwrap().emails, vec!["one@first.com"]);
        assert_eq!(b.unwrap().emails, vec!["two@second.com"]);
    }
}

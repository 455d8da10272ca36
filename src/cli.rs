// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// Every flag can also come from an environment variable (the `env` feature),
// which is how the server picks up PORT in container deployments.
// =============================================================================

use clap::{Args, Parser, Subcommand};
use std::time::Duration;

use crate::crawl::{CrawlBudget, DEFAULT_FETCH_TIMEOUT, DEFAULT_MAX_DURATION, DEFAULT_MAX_PAGES};

#[derive(Parser, Debug)]
#[command(
    name = "email-scout",
    version = "0.1.0",
    about = "Find a contact email address for a website",
    long_about = "email-scout crawls a website breadth-first, starting at the homepage and its \
                  usual contact/about pages, and stops at the first page that lists an email. \
                  Run it once from the command line or as a small HTTP service."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl one website and print the emails found
    ///
    /// Example: email-scout scan https://example.com --json
    Scan {
        /// Website URL to crawl (e.g., https://example.com)
        website_url: String,

        /// Output the full crawl report as JSON instead of a summary
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        budget: BudgetArgs,
    },

    /// Run the HTTP service (POST /scrape-emails)
    ///
    /// Example: PORT=3000 email-scout serve
    Serve {
        /// Address to bind to
        #[arg(long, env = "EMAIL_SCOUT_HOST", default_value = "0.0.0.0")]
        host: String,

        /// Port to listen on
        #[arg(long, env = "PORT", default_value_t = 8080)]
        port: u16,

        #[command(flatten)]
        budget: BudgetArgs,
    },
}

// Crawl limits shared by both subcommands
#[derive(Args, Debug, Clone)]
pub struct BudgetArgs {
    /// Stop after this many pages have been fetched
    #[arg(long, env = "EMAIL_SCOUT_MAX_PAGES", default_value_t = DEFAULT_MAX_PAGES)]
    pub max_pages: usize,

    /// Give up on a site after this many seconds
    #[arg(long, env = "EMAIL_SCOUT_MAX_CRAWL_SECS", default_value_t = DEFAULT_MAX_DURATION.as_secs())]
    pub max_crawl_secs: u64,

    /// Timeout for each individual page request, in seconds
    #[arg(long, env = "EMAIL_SCOUT_FETCH_TIMEOUT_SECS", default_value_t = DEFAULT_FETCH_TIMEOUT.as_secs())]
    pub fetch_timeout_secs: u64,
}

impl From<BudgetArgs> for CrawlBudget {
    fn from(args: BudgetArgs) -> Self {
        Self {
            max_pages: args.max_pages,
            max_duration: Duration::from_secs(args.max_crawl_secs),
            fetch_timeout: Duration::from_secs(args.fetch_timeout_secs),
        }
    }
}

// src/main.rs
// =============================================================================
// This is the entry point of our application.
//
// What happens here:
// 1. Set up logging (tracing) so diagnostics go to stderr
// 2. Parse command-line arguments using clap
// 3. Dispatch to the appropriate subcommand handler
// 4. Exit with proper code (0 = email found, 1 = none found, 2 = error)
//
// Rust concepts used:
// - async/await: Because crawling and serving are network-bound
// - Result<T, E>: For error handling (T = success type, E = error type)
// - match: Pattern matching to handle different subcommands
// =============================================================================

mod cli;           // src/cli.rs - command-line parsing
mod crawl;         // src/crawl/ - the crawl engine
mod error;         // src/error.rs - crawl errors
mod extract;       // src/extract/ - email and link extraction
mod server;        // src/server/ - HTTP service

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::{Cli, Commands};
use crawl::{CrawlBudget, CrawlReport, CrawlState, EmailCrawler};

#[tokio::main]
async fn main() {
    init_tracing();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so `scan --json` output on stdout stays parseable.
// RUST_LOG overrides the default level, e.g. RUST_LOG=email_scout=debug
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "email_scout=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

// Returns:
//   Ok(0) = an email was found (or the server shut down cleanly)
//   Ok(1) = crawl finished without finding an email
//   Err   = the crawl could not start, or the server failed
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scan { website_url, json, budget } => {
            handle_scan(&website_url, json, budget.into()).await
        }
        Commands::Serve { host, port, budget } => {
            let crawler = EmailCrawler::new(budget.into())?;
            server::serve(&host, port, crawler).await?;
            Ok(0)
        }
    }
}

// Handles the 'scan' subcommand
// Parameters:
//   website_url: the site to search (e.g., "https://example.com")
//   json: whether to output the full report as JSON
//   budget: page/time limits for the crawl
async fn handle_scan(website_url: &str, json: bool, budget: CrawlBudget) -> Result<i32> {
    let crawler = EmailCrawler::new(budget)?;

    if !json {
        println!("🔍 Searching for a contact email on: {}", website_url);
        println!(
            "📊 Budget: {} page(s), {}s",
            budget.max_pages,
            budget.max_duration.as_secs()
        );
    }

    let report = crawler
        .crawl(website_url)
        .await
        .with_context(|| format!("cannot crawl {}", website_url))?;

    print_report(&report, json)?;

    if report.found() {
        Ok(0)
    } else {
        Ok(1)
    }
}

// Prints the report either as a summary or JSON
fn print_report(report: &CrawlReport, json: bool) -> Result<()> {
    if json {
        let json_output = serde_json::to_string_pretty(report)?;
        println!("{}", json_output);
    } else {
        print_summary(report);
    }
    Ok(())
}

fn print_summary(report: &CrawlReport) {
    println!();
    if report.emails.is_empty() {
        println!("❌ No email found");
    } else {
        println!("✅ Found {} email(s):", report.emails.len());
        for email in &report.emails {
            println!("   {}", email);
        }
    }

    println!();
    println!("📊 Summary:");
    println!("   🏁 Result: {}", format_state(report.state));
    println!("   📄 Pages fetched: {}", report.pages_fetched);
    println!("   🌐 URLs tried: {}", report.visited.len());
    println!("   ⏱️  Time: {} ms", report.elapsed_ms);
}

fn format_state(state: CrawlState) -> &'static str {
    match state {
        CrawlState::Succeeded => "email found",
        CrawlState::Exhausted => "ran out of pages",
        CrawlState::TimedOut => "ran out of time",
    }
}

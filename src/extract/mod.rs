// src/extract/mod.rs
// =============================================================================
// Pure, synchronous helpers that look inside a fetched page.
//
// Submodules:
// - email: Finds email addresses in page text
// - links: Finds same-origin links to crawl next
//
// Nothing in here touches the network, which keeps it easy to test.
// =============================================================================

mod email;
mod links;

pub use email::extract_emails;
pub use links::extract_links;

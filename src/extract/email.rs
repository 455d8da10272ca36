// src/extract/email.rs
// =============================================================================
// This module finds email addresses in raw text.
//
// We run a regular expression over the whole page (markup included), so
// addresses in mailto: links, visible text, and attributes are all found.
//
// The catch: asset filenames like "logo@2x.png" look exactly like emails to
// a regex. Anything ending in a known image/archive/document extension is
// thrown away.
// =============================================================================

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

// local-part@domain.tld, case-insensitive
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}").expect("email pattern is valid")
});

// Matches ending in these are filenames, not addresses
const BLACKLISTED_EXTENSIONS: &[&str] = &[
    ".jpg", ".jpeg", ".png", ".svg", ".gif", ".tga", ".bmp", ".zip", ".pdf", ".webp",
];

// Extracts distinct email addresses from text
//
// Parameters:
//   text: any text blob, usually a full HTML page
//
// Returns: Vec<String> of unique matches, in the order they first appear.
//          Empty if nothing survives filtering (this never fails).
//
// Example:
//   "Write to sales@example.com or see logo@2x.png"
//   -> ["sales@example.com"]
pub fn extract_emails(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();

    EMAIL_PATTERN
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|candidate| !is_asset_filename(candidate))
        .filter(|candidate| seen.insert(*candidate))
        .map(str::to_string)
        .collect()
}

fn is_asset_filename(candidate: &str) -> bool {
    let lower = candidate.to_lowercase();
    BLACKLISTED_EXTENSIONS
        .iter()
        .any(|ext| lower.ends_with(ext))
}

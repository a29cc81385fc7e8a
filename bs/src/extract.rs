//! Title extraction from free-form model output
//!
//! The model is asked for a numbered list but tends to wrap it in preamble
//! and trailing commentary. Only lines shaped like `12. Some title` count.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// Digits, a period, at least one whitespace character, then the title
static NUMBERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s+(.*)$").expect("numbered item pattern is valid"));

/// Extract numbered list items from raw model text
///
/// Lines are trimmed before matching. Matching lines lose their `N. ` prefix
/// and the remainder is trimmed; everything else is dropped. Order follows the
/// text, not the numbers. Duplicates pass through.
///
/// Empty remainders are not filtered out. Because the line is trimmed first,
/// a bare `3. ` loses its whitespace and does not match at all.
pub fn extract_titles(raw: &str) -> Vec<String> {
    debug!(raw_len = raw.len(), "extract_titles: called");
    let titles: Vec<String> = raw
        .lines()
        .filter_map(|line| {
            NUMBERED_ITEM
                .captures(line.trim())
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().trim().to_string())
        })
        .collect();
    debug!(count = titles.len(), "extract_titles: done");
    titles
}

//! Embedded prompts
//!
//! These are compiled into the binary from .pmt files at build time.

use tracing::debug;

/// Title options prompt; expects `keyword`
pub const TITLES: &str = include_str!("../../prompts/titles.pmt");

/// Full post prompt; expects `title`
pub const POST: &str = include_str!("../../prompts/post.pmt");

/// Get the embedded prompt by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    debug!(%name, "get_embedded: called");
    match name {
        "titles" => Some(TITLES),
        "post" => Some(POST),
        _ => {
            debug!("get_embedded: no match found");
            None
        }
    }
}

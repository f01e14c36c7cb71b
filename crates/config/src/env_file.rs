//! `KEY=VALUE` env-file parsing.
//!
//! Rules: blank lines and `#` comments are skipped, the first `=` splits
//! key from value, both sides are trimmed, one pair of matching quotes
//! around the value is removed, and lines without `=` are ignored.
//! A later assignment of the same key replaces an earlier one.

use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, trace};

/// Parse env-file content into a key/value map.
pub fn parse(content: &str) -> HashMap<String, String> {
    let mut vars = HashMap::new();

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let Some((key, raw)) = trimmed.split_once('=') else {
            trace!(line = trimmed, "Skipping env line without '='");
            continue;
        };

        let key = key.trim();
        if key.is_empty() {
            continue;
        }

        vars.insert(key.to_string(), strip_quotes(raw.trim()).to_string());
    }

    vars
}

/// Read and parse an env file. Missing or unreadable files yield an empty map.
///
/// Invalid UTF-8 is decoded lossily so one bad byte doesn't hide the file.
pub fn load(path: &Path) -> HashMap<String, String> {
    match std::fs::read(path) {
        Ok(bytes) => parse(&String::from_utf8_lossy(&bytes)),
        Err(e) => {
            debug!(file = %path.display(), error = %e, "Env file not loaded");
            HashMap::new()
        }
    }
}

fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

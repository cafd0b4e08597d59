//! Dotted JSON paths for response mapping.
//!
//! Paths are dot-separated field names; `[n]` array indices are normalized
//! to `.n` before splitting, so `items[0].name` and `items.0.name` address
//! the same value.

use regex::Regex;
use serde_json::Value as JsonValue;
use std::sync::OnceLock;

static INDEX_RE: OnceLock<Regex> = OnceLock::new();

fn index_re() -> &'static Regex {
    INDEX_RE.get_or_init(|| Regex::new(r"\[(\d+)\]").expect("static regex"))
}

/// Walk a dotted path into a JSON value. Returns `None` when any segment
/// misses (absent key, out-of-range index, scalar in the middle).
#[must_use]
pub fn resolve_json_path<'a>(value: &'a JsonValue, path: &str) -> Option<&'a JsonValue> {
    let normalized = index_re().replace_all(path, ".$1");
    let mut current = value;
    for segment in normalized.split('.').filter(|s| !s.is_empty()) {
        current = match current {
            JsonValue::Object(map) => map.get(segment)?,
            JsonValue::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

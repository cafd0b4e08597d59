//! Helpers for interpreting raw model replies.

use crate::error::{LlmError, LlmResult};
use serde_json::Value as JsonValue;

/// Detect the `{"error": ...}` sentinel in a raw reply. Returns the error
/// message when the reply parses as a JSON object carrying an `error` key.
#[must_use]
pub fn error_sentinel(text: &str) -> Option<String> {
    let value: JsonValue = serde_json::from_str(text.trim()).ok()?;
    let err = value.as_object()?.get("error")?;
    Some(match err {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    })
}

/// Extract a JSON value from a model reply, tolerating markdown code fences
/// and prose around the payload.
pub fn extract_json(text: &str) -> LlmResult<JsonValue> {
    let trimmed = text.trim();

    if let Ok(value) = serde_json::from_str(trimmed) {
        return Ok(value);
    }

    // Fenced block: ```json ... ``` or plain ``` ... ```.
    if let Some(inner) = fenced_block(trimmed) {
        if let Ok(value) = serde_json::from_str(inner.trim()) {
            return Ok(value);
        }
    }

    // Last resort: the outermost braces/brackets.
    for (open, close) in [('{', '}'), ('[', ']')] {
        if let (Some(start), Some(end)) = (trimmed.find(open), trimmed.rfind(close)) {
            if start < end {
                if let Ok(value) = serde_json::from_str(&trimmed[start..=end]) {
                    return Ok(value);
                }
            }
        }
    }

    Err(LlmError::Parse(truncate(trimmed, 200)))
}

fn fenced_block(text: &str) -> Option<&str> {
    let rest = text.strip_prefix("```")?;
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let end = rest.rfind("```")?;
    Some(&rest[..end])
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        let mut end = max;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}

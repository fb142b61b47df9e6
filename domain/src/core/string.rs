//! String utilities for the domain layer.

use serde_json::Value;

/// Truncate a string to a maximum length with ellipsis (UTF-8 safe)
///
/// `max_len` is measured in bytes; the cut point is moved back to the nearest
/// character boundary.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut end = max_len.saturating_sub(3).min(s.len());
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}

/// Render a JSON value as a short single-line preview.
///
/// Strings are shown without quotes; everything else uses compact JSON.
pub fn value_preview(value: &Value, max_len: usize) -> String {
    let text = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    truncate(&text.replace('\n', " "), max_len)
}

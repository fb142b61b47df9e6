//! Argument placeholder resolution.
//!
//! A tool call may reference the payload of an earlier call through a
//! placeholder inside any string argument:
//!
//! | Form | Resolves to |
//! |------|-------------|
//! | `"${A}"` | the whole payload of call `A`, JSON type preserved |
//! | `"${A.guest.name}"` | the value at that path (numeric segments index arrays) |
//! | `"Dear ${A.guest.name}!"` | the text with the value spliced in (strings unquoted) |
//!
//! Placeholders are substituted from the [`ResultAccumulator`] just before
//! dispatch. A placeholder whose call is missing, failed, or lacks the path
//! is left verbatim; the capability is responsible for rejecting it.

use crate::orchestration::results::ResultAccumulator;
use crate::tool::entities::Arguments;
use serde_json::Value;

const OPEN: &str = "${";
const CLOSE: char = '}';

/// Resolve every placeholder in an argument map.
pub fn resolve_arguments(arguments: &Arguments, results: &ResultAccumulator) -> Arguments {
    arguments
        .iter()
        .map(|(key, value)| (key.clone(), resolve_value(value, results)))
        .collect()
}

/// Resolve placeholders inside a single JSON value, recursing into arrays and objects.
pub fn resolve_value(value: &Value, results: &ResultAccumulator) -> Value {
    match value {
        Value::String(s) => resolve_string(s, results),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| resolve_value(item, results))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, item)| (key.clone(), resolve_value(item, results)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Raw placeholder expressions (`A.guest.name`) referenced anywhere in the arguments.
pub fn placeholder_references(arguments: &Arguments) -> Vec<String> {
    let mut refs = Vec::new();
    for value in arguments.values() {
        collect_references(value, &mut refs);
    }
    refs.sort();
    refs.dedup();
    refs
}

fn collect_references(value: &Value, refs: &mut Vec<String>) {
    match value {
        Value::String(s) => {
            let mut rest = s.as_str();
            while let Some(start) = rest.find(OPEN) {
                let after = &rest[start + OPEN.len()..];
                let Some(end) = after.find(CLOSE) else {
                    break;
                };
                refs.push(after[..end].trim().to_string());
                rest = &after[end + 1..];
            }
        }
        Value::Array(items) => items.iter().for_each(|item| collect_references(item, refs)),
        Value::Object(map) => map.values().for_each(|item| collect_references(item, refs)),
        _ => {}
    }
}

fn resolve_string(s: &str, results: &ResultAccumulator) -> Value {
    if let Some(expr) = whole_placeholder(s) {
        return match lookup(expr, results) {
            Some(value) => value.clone(),
            None => Value::String(s.to_string()),
        };
    }
    if !s.contains(OPEN) {
        return Value::String(s.to_string());
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find(OPEN) {
        out.push_str(&rest[..start]);
        let after = &rest[start + OPEN.len()..];
        let Some(end) = after.find(CLOSE) else {
            // Unterminated: keep the remainder as-is
            out.push_str(&rest[start..]);
            rest = "";
            break;
        };
        let expr = &after[..end];
        match lookup(expr, results) {
            Some(value) => out.push_str(&render(value)),
            None => {
                out.push_str(OPEN);
                out.push_str(expr);
                out.push(CLOSE);
            }
        }
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    Value::String(out)
}

/// `"${expr}"` with nothing around it and no nested placeholder.
fn whole_placeholder(s: &str) -> Option<&str> {
    let expr = s.strip_prefix(OPEN)?.strip_suffix(CLOSE)?;
    if expr.trim().is_empty() || expr.contains(CLOSE) || expr.contains(OPEN) {
        None
    } else {
        Some(expr)
    }
}

/// Find the longest id prefix of `expr` that has a payload, then walk the rest as a path.
fn lookup<'a>(expr: &str, results: &'a ResultAccumulator) -> Option<&'a Value> {
    let expr = expr.trim();
    if let Some(payload) = results.payload(expr) {
        return Some(payload);
    }
    for (pos, _) in expr.rmatch_indices('.') {
        if let Some(payload) = results.payload(&expr[..pos]) {
            return navigate(payload, &expr[pos + 1..]);
        }
    }
    None
}

fn navigate<'a>(mut value: &'a Value, path: &str) -> Option<&'a Value> {
    for segment in path.split('.') {
        value = match value {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(value)
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::value_objects::{ErrorKind, ExecutionOutcome};
    use serde_json::json;

    fn results() -> ResultAccumulator {
        let mut acc = ResultAccumulator::new();
        acc.insert(
            "A".into(),
            ExecutionOutcome::success(json!({
                "guest": {"name": "Ada", "nights": 3},
                "rooms": [101, 102]
            })),
        )
        .unwrap();
        acc.insert("B".into(), ExecutionOutcome::success(json!("plain text")))
            .unwrap();
        acc.insert(
            "F".into(),
            ExecutionOutcome::failure(ErrorKind::Timeout, "slow"),
        )
        .unwrap();
        acc.insert("v1.2".into(), ExecutionOutcome::success(json!({"ok": true})))
            .unwrap();
        acc
    }

    #[test]
    fn test_whole_value_preserves_type() {
        let acc = results();
        assert_eq!(resolve_value(&json!("${A.guest.nights}"), &acc), json!(3));
        assert_eq!(resolve_value(&json!("${A.rooms.1}"), &acc), json!(102));
        assert_eq!(
            resolve_value(&json!("${A.guest}"), &acc),
            json!({"name": "Ada", "nights": 3})
        );
        assert_eq!(resolve_value(&json!("${B}"), &acc), json!("plain text"));
    }

    #[test]
    fn test_embedded_placeholders_render_as_text() {
        let acc = results();
        assert_eq!(
            resolve_value(&json!("Dear ${A.guest.name}, ${A.guest.nights} nights"), &acc),
            json!("Dear Ada, 3 nights")
        );
    }

    #[test]
    fn test_unresolvable_placeholders_stay_verbatim() {
        let acc = results();
        assert_eq!(resolve_value(&json!("${missing}"), &acc), json!("${missing}"));
        assert_eq!(resolve_value(&json!("${F}"), &acc), json!("${F}"));
        assert_eq!(
            resolve_value(&json!("${A.guest.email}"), &acc),
            json!("${A.guest.email}")
        );
        assert_eq!(
            resolve_value(&json!("x ${missing.y} z"), &acc),
            json!("x ${missing.y} z")
        );
        assert_eq!(resolve_value(&json!("open ${A"), &acc), json!("open ${A"));
    }

    #[test]
    fn test_ids_containing_dots() {
        let acc = results();
        assert_eq!(resolve_value(&json!("${v1.2}"), &acc), json!({"ok": true}));
        assert_eq!(resolve_value(&json!("${v1.2.ok}"), &acc), json!(true));
    }

    #[test]
    fn test_recurses_into_nested_arguments() {
        let acc = results();
        let mut args = Arguments::new();
        args.insert("list".into(), json!(["${A.guest.name}", 7, {"b": "${B}"}]));
        args.insert("count".into(), json!(2));

        let resolved = resolve_arguments(&args, &acc);
        assert_eq!(resolved["list"], json!(["Ada", 7, {"b": "plain text"}]));
        assert_eq!(resolved["count"], json!(2));
    }

    #[test]
    fn test_placeholder_references() {
        let mut args = Arguments::new();
        args.insert("a".into(), json!("${A.guest.name} and ${ B }"));
        args.insert("b".into(), json!(["${A.guest.name}"]));
        assert_eq!(placeholder_references(&args), vec!["A.guest.name", "B"]);
    }
}

// src/utils/fields.rs
use serde_json::Value;

/// Resolve a field on a record; dotted paths walk nested objects.
pub fn lookup<'a>(item: &'a Value, path: &str) -> Option<&'a Value> {
    if let Some(value) = item.get(path) {
        return Some(value);
    }
    path.split('.')
        .try_fold(item, |current, segment| current.get(segment))
}

/// Text form of a scalar field, used by search and filter matching.
/// Objects, arrays and null have no text form.
pub fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub fn text_at(item: &Value, path: &str) -> Option<String> {
    lookup(item, path).and_then(as_text)
}

/// Numeric form of a field; numeric strings such as `"450"` count.
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

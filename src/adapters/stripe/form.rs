//! Provider form encoding.
//!
//! The provider's API does not accept JSON bodies; nested request
//! payloads go over the wire as `application/x-www-form-urlencoded`
//! pairs with bracket notation for nesting: object field `a.b` becomes
//! key `a[b]`, list element `i` under prefix `p` becomes `p[i]`.
//!
//! Encoding is total: any JSON value encodes without a failure mode.
//! Null values are omitted entirely rather than sent as empty strings,
//! so the API applies its own defaults; list indices are assigned by
//! original position, so omitted entries leave holes instead of
//! renumbering their neighbors.

use serde_json::Value;

/// Flatten a JSON payload into a form-urlencoded string.
///
/// Top-level keys carry no bracket prefix. A top-level value that is not
/// an object has no keys to emit and encodes to an empty string.
pub fn encode(payload: &Value) -> String {
    if !payload.is_object() {
        return String::new();
    }
    let mut pairs: Vec<(String, String)> = Vec::new();
    flatten("", payload, &mut pairs);
    serde_urlencoded::to_string(&pairs).unwrap_or_default()
}

fn flatten(prefix: &str, value: &Value, pairs: &mut Vec<(String, String)>) {
    match value {
        // Omitted, not emitted as an empty string.
        Value::Null => {}
        Value::Bool(flag) => pairs.push((prefix.to_string(), flag.to_string())),
        Value::Number(number) => pairs.push((prefix.to_string(), number.to_string())),
        Value::String(text) => pairs.push((prefix.to_string(), text.clone())),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                flatten(&format!("{}[{}]", prefix, index), item, pairs);
            }
        }
        Value::Object(fields) => {
            for (field, item) in fields {
                let key = if prefix.is_empty() {
                    field.clone()
                } else {
                    format!("{}[{}]", prefix, field)
                };
                flatten(&key, item, pairs);
            }
        }
    }
}

//! Option bags: the JSON-like field maps ingested by every widget.

use serde_json::{Map, Value};

/// Caller-supplied widget options. Keys keep insertion order.
pub type Options = Map<String, Value>;

/// Merge `source` into `target`; later keys overwrite earlier ones.
pub fn merge(target: &mut Options, source: &Options) {
    for (key, value) in source {
        target.insert(key.clone(), value.clone());
    }
}

/// Read an option as a string. Numbers and booleans are stringified.
pub fn get_str(options: &Options, key: &str) -> Option<String> {
    options.get(key).and_then(value_to_string)
}

/// Read an option with truthiness semantics: null, `false`, `0`, `""` and
/// absence are false; everything else is true.
pub fn is_truthy(options: &Options, key: &str) -> bool {
    options.get(key).is_some_and(truthy)
}

/// Truthiness of a single value (see [`is_truthy`]).
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Render a scalar value as a string; arrays join their items with `,`.
///
/// Returns `None` for null and objects.
pub fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => Some(
            items
                .iter()
                .map(|item| value_to_string(item).unwrap_or_default())
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Null | Value::Object(_) => None,
    }
}

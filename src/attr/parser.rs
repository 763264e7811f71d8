//! Parser for the declarative attribute micro-grammar.
//!
//! ```text
//! attr    := segment (';' segment)*
//! segment := key ':' value
//! ```
//!
//! Whitespace next to `:` and `;` is insignificant. The value is everything
//! after the first `:` of its segment. Segments are read left to right, so
//! repeated keys keep source order without any reversal step.

use indexmap::IndexMap;
use serde_json::Value;

use super::context::ContextLookup;
use super::tokenizer::{tokenize, Spanned, Token};
use crate::options::Options;

/// One `key:value` segment before value resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// The trimmed key.
    pub key: String,
    /// The trimmed raw value, or `None` when the segment has no `:`.
    pub raw: Option<String>,
}

/// Split an attribute value into segments.
///
/// Empty segments (e.g. from a trailing `;`) and segments with an empty key
/// are skipped.
pub fn segments(input: &str) -> Vec<Segment> {
    let tokens = tokenize(input);
    tokens
        .split(|t| t.token == Token::Semicolon)
        .filter_map(|group| segment(input, group))
        .collect()
}

fn segment(input: &str, group: &[Spanned]) -> Option<Segment> {
    let first = group.first()?;
    let last = group.last()?;
    let colon = group.iter().find(|t| t.token == Token::Colon);

    let (key, raw) = match colon {
        Some(colon) => (
            input[first.start..colon.start].trim(),
            Some(input[colon.end..last.end].trim().to_owned()),
        ),
        None => (input[first.start..last.end].trim(), None),
    };

    if key.is_empty() {
        return None;
    }
    Some(Segment {
        key: key.to_owned(),
        raw,
    })
}

/// Resolve one raw value.
///
/// - fully wrapped in matching `'` or `"`: the content between the quotes;
/// - starting with `@`: looked up in `params`, then in `context`, else null;
/// - anything else: the literal string.
pub fn resolve_value(raw: &str, params: &Options, context: &dyn ContextLookup) -> Value {
    if let Some(inner) = unquote(raw) {
        return Value::String(inner.to_owned());
    }
    if let Some(name) = raw.strip_prefix('@') {
        return params
            .get(name)
            .cloned()
            .or_else(|| context.lookup(name))
            .unwrap_or(Value::Null);
    }
    Value::String(raw.to_owned())
}

fn unquote(raw: &str) -> Option<&str> {
    if raw.len() < 2 {
        return None;
    }
    ['"', '\'']
        .into_iter()
        .find(|&q| raw.starts_with(q) && raw.ends_with(q))
        .map(|_| &raw[1..raw.len() - 1])
}

/// Parse and resolve an attribute value into an option bag.
///
/// A key seen once maps to a scalar; a key seen two or more times maps to an
/// array of its values in source order. A segment without `:` maps its key
/// to null.
pub fn parse(input: &str, params: &Options, context: &dyn ContextLookup) -> Options {
    let mut collected: IndexMap<String, Vec<Value>> = IndexMap::new();
    for Segment { key, raw } in segments(input) {
        let value = match raw {
            Some(raw) => resolve_value(&raw, params, context),
            None => Value::Null,
        };
        collected.entry(key).or_default().push(value);
    }

    collected
        .into_iter()
        .map(|(key, mut values)| {
            let value = if values.len() == 1 {
                values.remove(0)
            } else {
                Value::Array(values)
            };
            (key, value)
        })
        .collect()
}

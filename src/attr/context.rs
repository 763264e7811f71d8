//! Pluggable fallback lookup for `@name` parameter references.

use std::collections::HashMap;

use serde_json::Value;

use crate::options::Options;

/// Resolves a parameter name that the caller-supplied map did not contain.
pub trait ContextLookup {
    /// Look up `name`. `None` means unresolved.
    fn lookup(&self, name: &str) -> Option<Value>;
}

/// A context that resolves nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyContext;

impl ContextLookup for EmptyContext {
    fn lookup(&self, _name: &str) -> Option<Value> {
        None
    }
}

impl ContextLookup for Options {
    fn lookup(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

impl ContextLookup for HashMap<String, Value> {
    fn lookup(&self, name: &str) -> Option<Value> {
        self.get(name).cloned()
    }
}

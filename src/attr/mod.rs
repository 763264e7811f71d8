//! Declarative attribute micro-grammar: tokenizer, parser, parameter lookup.

pub mod context;
pub mod parser;
pub mod tokenizer;

pub use context::{ContextLookup, EmptyContext};
pub use parser::{parse, resolve_value, segments, Segment};

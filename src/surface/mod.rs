//! Rendering surface: a headless slotmap-backed node tree with attributes,
//! class strings, visibility, listener registration and text selection.

pub mod node;
pub mod tree;

pub use node::{NodeData, NodeId};
pub use tree::Surface;

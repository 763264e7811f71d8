//! Snapshot helpers.
//!
//! Plain-text dumps of the surface tree and the widget tree, suitable for
//! `insta` snapshots and substring assertions.

use crate::engine::Engine;
use crate::surface::{NodeData, NodeId, Surface};
use crate::widget::{Owner, WidgetKey};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Dump the subtree rooted at `root`, one node per line, two spaces of
/// indentation per level.
///
/// A line reads `tag#id.class1.class2` followed by the node value in quotes
/// when non-empty, then any of the flags `hidden`, `disabled`, `readonly`.
pub fn surface_to_string(surface: &Surface, root: NodeId) -> String {
    let mut lines = Vec::new();
    let mut stack = vec![(root, 0usize)];
    while let Some((node, depth)) = stack.pop() {
        let Some(data) = surface.get(node) else {
            continue;
        };
        lines.push(format!("{}{}", "  ".repeat(depth), node_line(data)));
        for &child in surface.children(node).iter().rev() {
            stack.push((child, depth + 1));
        }
    }
    lines.join("\n")
}

/// Dump every widget below `owner`, one per line: `id (type)` followed by
/// the sorted state flags in brackets when any are set.
pub fn widget_tree_to_string(engine: &Engine, owner: impl Into<Owner>) -> String {
    let mut lines = Vec::new();
    let mut stack: Vec<(WidgetKey, usize)> = children_of(engine, owner.into())
        .into_iter()
        .rev()
        .map(|key| (key, 0))
        .collect();
    while let Some((key, depth)) = stack.pop() {
        let Some(control) = engine.control(key) else {
            continue;
        };
        let mut line = format!(
            "{}{} ({})",
            "  ".repeat(depth),
            control.id(),
            control.widget_type()
        );
        if !control.states().is_empty() {
            let states: Vec<&str> = control.states().iter().map(|s| s.as_str()).collect();
            line.push_str(&format!(" [{}]", states.join(", ")));
        }
        lines.push(line);
        for child in control.children().into_iter().rev() {
            stack.push((child, depth + 1));
        }
    }
    lines.join("\n")
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

fn children_of(engine: &Engine, owner: Owner) -> Vec<WidgetKey> {
    match owner {
        Owner::Widget(key) => engine.control(key).map(|c| c.children()).unwrap_or_default(),
        Owner::Scope(scope) => engine
            .scope(scope)
            .map(|s| s.control_map().values().copied().collect())
            .unwrap_or_default(),
    }
}

fn node_line(data: &NodeData) -> String {
    let mut line = data.tag.clone();
    if let Some(id) = &data.id {
        line.push('#');
        line.push_str(id);
    }
    for class in data.class_name().split_whitespace() {
        line.push('.');
        line.push_str(class);
    }
    if !data.value.is_empty() {
        line.push_str(&format!(" {:?}", data.value));
    }
    for (flag, set) in [
        ("hidden", !data.visible),
        ("disabled", data.disabled),
        ("readonly", data.readonly),
    ] {
        if set {
            line.push(' ');
            line.push_str(flag);
        }
    }
    line
}

// ===========================================================================
// Tests
// ===========================================================================

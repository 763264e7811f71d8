//! Tree queries: subtree enumeration and lookup by id or form name.

use super::Engine;
use crate::scope::ScopeId;
use crate::surface::NodeId;
use crate::widget::{Owner, WidgetKey};

impl Engine {
    /// Every widget below `owner`, depth-first pre-order, each child map in
    /// insertion order. The owner itself is excluded.
    pub fn find_all_control(&self, owner: impl Into<Owner>) -> Vec<WidgetKey> {
        let mut result = Vec::new();
        let mut stack: Vec<WidgetKey> = self
            .owner_map(owner.into())
            .map(|map| map.values().rev().copied().collect())
            .unwrap_or_default();

        while let Some(key) = stack.pop() {
            let Some(control) = self.control(key) else {
                continue;
            };
            result.push(key);
            stack.extend(control.control_map().values().rev().copied());
        }
        result
    }

    /// Every descendant node of `root` (the surface root when `None`),
    /// document order, `root` excluded.
    pub fn find_all_nodes(&self, root: Option<NodeId>) -> Vec<NodeId> {
        let root = root
            .filter(|n| self.surface.contains(*n))
            .unwrap_or(self.surface.root());
        self.surface.find_all_nodes(root)
    }

    /// Find a widget by id anywhere under the default scope.
    pub fn get(&self, id: &str) -> Option<WidgetKey> {
        self.get_in(id, self.default_scope)
    }

    /// Find a widget by id anywhere under `owner`. When several share the
    /// id, the last in traversal order wins.
    pub fn get_in(&self, id: &str, owner: impl Into<Owner>) -> Option<WidgetKey> {
        self.find_all_control(owner)
            .into_iter()
            .rev()
            .find(|&key| self.control(key).is_some_and(|c| c.id() == id))
    }

    /// The root scope itself, or the default scope when `scope` is `None`
    /// or unknown.
    pub fn get_scope(&self, scope: Option<ScopeId>) -> ScopeId {
        self.resolve_scope(scope)
    }

    /// The first form-capable widget, depth-first from `root` inclusive,
    /// whose form name equals `name`.
    pub fn get_by_form_name(&self, name: &str, root: impl Into<Owner>) -> Option<WidgetKey> {
        let mut stack: Vec<WidgetKey> = match root.into() {
            Owner::Widget(key) => vec![key],
            owner @ Owner::Scope(_) => self
                .owner_map(owner)
                .map(|map| map.values().rev().copied().collect())
                .unwrap_or_default(),
        };

        while let Some(key) = stack.pop() {
            let Some(slot) = self.widgets.get(key) else {
                continue;
            };
            if let Some(form) = slot.widget.form() {
                if form.form_name(&slot.control, &self.surface).as_deref() == Some(name) {
                    return Some(key);
                }
            }
            stack.extend(slot.control.control_map().values().rev().copied());
        }
        None
    }
}

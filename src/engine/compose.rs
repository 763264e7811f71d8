//! Tree composition: ownership links between widgets and root scopes, and
//! the mapping from surface nodes back to their owning widget.

use indexmap::IndexMap;
use tracing::{trace, warn};

use super::Engine;
use crate::error::{EngineError, SurfaceError};
use crate::scope::ScopeId;
use crate::surface::NodeId;
use crate::widget::{Owner, WidgetKey};

/// Where [`Engine::append_to`] attaches a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendTarget {
    /// A surface node. The widget's node is appended under it and the widget
    /// joins the nearest owning widget of that node, if any.
    Node(NodeId),
    /// A widget or root scope. The widget joins its control map and its node
    /// is appended under the owner's presentation.
    Owner(Owner),
}

impl From<NodeId> for AppendTarget {
    fn from(node: NodeId) -> Self {
        AppendTarget::Node(node)
    }
}

impl From<Owner> for AppendTarget {
    fn from(owner: Owner) -> Self {
        AppendTarget::Owner(owner)
    }
}

impl From<WidgetKey> for AppendTarget {
    fn from(key: WidgetKey) -> Self {
        AppendTarget::Owner(Owner::Widget(key))
    }
}

impl From<ScopeId> for AppendTarget {
    fn from(scope: ScopeId) -> Self {
        AppendTarget::Owner(Owner::Scope(scope))
    }
}

impl Engine {
    /// Make `owner` the parent of `child`.
    ///
    /// The child is first removed from its previous owner's map (only if that
    /// map still holds this child under its id). An existing entry under the
    /// same id in the new owner's map is replaced.
    pub fn append_control(
        &mut self,
        owner: impl Into<Owner>,
        child: WidgetKey,
    ) -> Result<(), EngineError> {
        let owner = owner.into();
        let child_id = self
            .widgets
            .get(child)
            .ok_or(EngineError::UnknownWidget(child))?
            .control
            .id()
            .to_owned();

        match owner {
            Owner::Widget(parent) => {
                let parent_id = self
                    .widgets
                    .get(parent)
                    .ok_or(EngineError::UnknownWidget(parent))?
                    .control
                    .id()
                    .to_owned();
                if parent == child || self.is_ancestor(child, parent) {
                    return Err(EngineError::Cycle {
                        parent: parent_id,
                        child: child_id,
                    });
                }
            }
            Owner::Scope(scope) => {
                if !self.scopes.contains_key(scope) {
                    return Err(EngineError::UnknownScope);
                }
            }
        }

        self.detach_from_parent(child);

        if let Some(map) = self.owner_map_mut(owner) {
            if let Some(previous) = map.insert(child_id.clone(), child) {
                if previous != child {
                    warn!(id = %child_id, "widget id collision: previous entry replaced");
                }
            }
        }
        self.widgets[child].control.set_parent(Some(owner));
        self.lifecycle.on_attach(child, owner);
        trace!(id = %child_id, ?owner, "widget attached");
        Ok(())
    }

    /// Attach a widget to a surface node or an owner, moving its node along.
    ///
    /// The node move is checked before the ownership link changes, so a
    /// failed move leaves both trees untouched.
    pub fn append_to(
        &mut self,
        key: WidgetKey,
        target: impl Into<AppendTarget>,
    ) -> Result<(), EngineError> {
        let main = self
            .control(key)
            .ok_or(EngineError::UnknownWidget(key))?
            .main();

        match target.into() {
            AppendTarget::Node(node) => {
                if !self.surface.contains(node) {
                    return Err(SurfaceError::UnknownNode(node).into());
                }
                self.check_node_move(node, main)?;
                if let Some(owner) = self.owning_widget(node) {
                    if owner != key {
                        self.append_control(owner, key)?;
                    }
                }
                if let Some(main) = main {
                    self.surface.append_child(node, main)?;
                }
            }
            AppendTarget::Owner(owner) => {
                let container = self.container_node(owner);
                self.check_node_move(container, main)?;
                self.append_control(owner, key)?;
                if let Some(main) = main {
                    self.surface.append_child(container, main)?;
                }
            }
        }
        Ok(())
    }

    /// The nearest live widget bound to `node` or one of its ancestors.
    pub fn owning_widget(&self, node: NodeId) -> Option<WidgetKey> {
        let max_depth = self.config.max_ancestor_depth;
        let mut current = Some(node);
        let mut depth = 0;
        while let Some(id) = current {
            if depth > max_depth {
                warn!(max_depth, "ancestor walk exceeded the depth bound");
                return None;
            }
            if let Some(&key) = self.bindings.get(id) {
                if self.control(key).is_some_and(|c| !c.is_disposed()) {
                    return Some(key);
                }
            }
            current = self.surface.parent(id);
            depth += 1;
        }
        None
    }

    /// The enclosing action scope of a widget, if its top-most owner is one.
    pub fn get_action(&self, key: WidgetKey) -> Option<ScopeId> {
        let mut current = self.control(key)?.parent();
        loop {
            match current? {
                Owner::Widget(parent) => current = self.control(parent)?.parent(),
                Owner::Scope(scope) => {
                    return self
                        .scopes
                        .get(scope)
                        .filter(|s| s.is_action())
                        .map(|_| scope);
                }
            }
        }
    }

    /// A textual reference that locates the widget: `get('<id>','<action id>')`.
    pub fn str_ref(&self, key: WidgetKey) -> Option<String> {
        let control = self.control(key)?;
        let action = self
            .get_action(key)
            .and_then(|scope| self.scopes.get(scope))
            .map(|scope| scope.id())
            .unwrap_or_default();
        Some(format!("get('{}','{}')", control.id(), action))
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    /// Whether `ancestor` is on the owner chain of `key`.
    fn is_ancestor(&self, ancestor: WidgetKey, key: WidgetKey) -> bool {
        let mut current = self.control(key).and_then(|c| c.parent());
        while let Some(Owner::Widget(parent)) = current {
            if parent == ancestor {
                return true;
            }
            current = self.control(parent).and_then(|c| c.parent());
        }
        false
    }

    /// Fails when `main` is `target` or one of its ancestors.
    fn check_node_move(&self, target: NodeId, main: Option<NodeId>) -> Result<(), SurfaceError> {
        match main {
            Some(main) if main == target || self.surface.ancestors(target).contains(&main) => {
                Err(SurfaceError::Cycle {
                    parent: target,
                    child: main,
                })
            }
            _ => Ok(()),
        }
    }

    /// Remove `child` from its owner's map and clear its parent link.
    pub(crate) fn detach_from_parent(&mut self, child: WidgetKey) {
        let Some(control) = self.control(child) else {
            return;
        };
        let id = control.id().to_owned();
        if let Some(owner) = control.parent() {
            if let Some(map) = self.owner_map_mut(owner) {
                if map.get(&id) == Some(&child) {
                    map.shift_remove(&id);
                }
            }
        }
        if let Some(slot) = self.widgets.get_mut(child) {
            slot.control.set_parent(None);
        }
    }

    pub(crate) fn owner_map(&self, owner: Owner) -> Option<&IndexMap<String, WidgetKey>> {
        match owner {
            Owner::Widget(key) => self.control(key).map(|c| c.control_map()),
            Owner::Scope(scope) => self.scopes.get(scope).map(|s| s.control_map()),
        }
    }

    fn owner_map_mut(&mut self, owner: Owner) -> Option<&mut IndexMap<String, WidgetKey>> {
        match owner {
            Owner::Widget(key) => self
                .widgets
                .get_mut(key)
                .map(|slot| slot.control.control_map_mut()),
            Owner::Scope(scope) => self.scopes.get_mut(scope).map(|s| s.control_map_mut()),
        }
    }

    /// The surface node that presents `owner`: the nearest attached main node
    /// up the owner chain, else the surface root.
    fn container_node(&self, owner: Owner) -> NodeId {
        let mut current = Some(owner);
        while let Some(Owner::Widget(key)) = current {
            let Some(control) = self.control(key) else {
                break;
            };
            if let Some(main) = control.main().filter(|m| self.surface.contains(*m)) {
                return main;
            }
            current = control.parent();
        }
        self.surface.root()
    }
}

//! Root scopes: the top-level owners of widget trees.

use indexmap::IndexMap;
use slotmap::new_key_type;

use crate::widget::WidgetKey;

new_key_type! {
    /// Arena key of a root scope.
    pub struct ScopeId;
}

/// Kind of a root scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    /// The engine's default scope. Never reported by `get_action`.
    Default,
    /// An application-created action scope.
    Action,
}

/// A root scope: an id, a kind and a control map.
#[derive(Debug, Clone)]
pub struct Scope {
    id: String,
    kind: ScopeKind,
    control_map: IndexMap<String, WidgetKey>,
}

impl Scope {
    pub fn new(id: impl Into<String>, kind: ScopeKind) -> Self {
        Self {
            id: id.into(),
            kind,
            control_map: IndexMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> ScopeKind {
        self.kind
    }

    pub fn is_action(&self) -> bool {
        self.kind == ScopeKind::Action
    }

    /// Widgets registered directly under this scope, keyed by id.
    pub fn control_map(&self) -> &IndexMap<String, WidgetKey> {
        &self.control_map
    }

    pub(crate) fn control_map_mut(&mut self) -> &mut IndexMap<String, WidgetKey> {
        &mut self.control_map
    }
}

//! The engine: owns the surface, the widget arena, root scopes and the
//! collaborators, and implements every tree-level operation.
//!
//! Widgets live in a slotmap arena and are addressed by [`WidgetKey`]. The
//! link from a surface node back to the widget presenting through it is a
//! side table keyed by [`NodeId`]; nodes never carry engine fields.

mod compose;
mod create;
mod dispatch;
mod dispose;
mod form;
mod lookup;
mod state;

pub use compose::AppendTarget;

use slotmap::{SecondaryMap, SlotMap};

use crate::attr::{ContextLookup, EmptyContext};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::event::{DeferredQueue, DeferredTask, EventQueue, Message};
use crate::registry::WidgetRegistry;
use crate::scope::{Scope, ScopeId, ScopeKind};
use crate::surface::{NodeId, Surface};
use crate::widget::{
    AcceptAll, Control, LifecycleEvent, LifecycleTracker, RuleEvaluator, Widget, WidgetCx, WidgetKey,
};

/// Id of the default root scope.
pub const DEFAULT_SCOPE_ID: &str = "default";

pub(crate) struct WidgetSlot {
    pub(crate) control: Control,
    pub(crate) widget: Box<dyn Widget>,
    /// Children held at dispose time, so a later release can still find them.
    pub(crate) disposed_children: Vec<WidgetKey>,
}

/// Widget composition and lifecycle engine.
pub struct Engine {
    config: EngineConfig,
    surface: Surface,
    widgets: SlotMap<WidgetKey, WidgetSlot>,
    scopes: SlotMap<ScopeId, Scope>,
    default_scope: ScopeId,
    bindings: SecondaryMap<NodeId, WidgetKey>,
    registry: WidgetRegistry,
    context: Box<dyn ContextLookup>,
    rules: Box<dyn RuleEvaluator>,
    messages: EventQueue,
    deferred: DeferredQueue,
    lifecycle: LifecycleTracker,
}

impl Engine {
    /// An engine with the default config and the built-in widgets.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// An engine with the given config and the built-in widgets.
    pub fn with_config(config: EngineConfig) -> Self {
        let mut scopes = SlotMap::with_key();
        let default_scope = scopes.insert(Scope::new(DEFAULT_SCOPE_ID, ScopeKind::Default));
        Self {
            config,
            surface: Surface::new(),
            widgets: SlotMap::with_key(),
            scopes,
            default_scope,
            bindings: SecondaryMap::new(),
            registry: WidgetRegistry::with_builtins(),
            context: Box::new(EmptyContext),
            rules: Box::new(AcceptAll),
            messages: EventQueue::new(),
            deferred: DeferredQueue::new(),
            lifecycle: LifecycleTracker::new(),
        }
    }

    /// Replace the widget registry (builder).
    pub fn with_registry(mut self, registry: WidgetRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Install the fallback lookup for `@name` references (builder).
    pub fn with_context(mut self, context: impl ContextLookup + 'static) -> Self {
        self.context = Box::new(context);
        self
    }

    /// Install the validation rule evaluator (builder).
    pub fn with_rule_evaluator(mut self, rules: impl RuleEvaluator + 'static) -> Self {
        self.rules = Box::new(rules);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut Surface {
        &mut self.surface
    }

    pub fn registry(&self) -> &WidgetRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut WidgetRegistry {
        &mut self.registry
    }

    // -----------------------------------------------------------------------
    // Scopes
    // -----------------------------------------------------------------------

    /// The process default root scope.
    pub fn default_scope(&self) -> ScopeId {
        self.default_scope
    }

    /// Create an action scope owned by the application.
    pub fn create_scope(&mut self, id: impl Into<String>) -> ScopeId {
        self.scopes.insert(Scope::new(id, ScopeKind::Action))
    }

    pub fn scope(&self, scope: ScopeId) -> Option<&Scope> {
        self.scopes.get(scope)
    }

    /// `scope` if it exists, else the default scope.
    pub fn resolve_scope(&self, scope: Option<ScopeId>) -> ScopeId {
        scope
            .filter(|s| self.scopes.contains_key(*s))
            .unwrap_or(self.default_scope)
    }

    /// Release every widget registered under `scope`, then remove the scope.
    pub fn remove_scope(&mut self, scope: ScopeId) -> Result<(), EngineError> {
        if scope == self.default_scope {
            return Err(EngineError::DefaultScope);
        }
        let keys: Vec<WidgetKey> = self
            .scopes
            .get(scope)
            .ok_or(EngineError::UnknownScope)?
            .control_map()
            .values()
            .copied()
            .collect();
        for key in keys {
            if self.widgets.contains_key(key) {
                self.release(key)?;
            }
        }
        self.scopes.remove(scope);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Widget access
    // -----------------------------------------------------------------------

    /// Whether `key` addresses a widget in the arena (live or disposed).
    pub fn contains(&self, key: WidgetKey) -> bool {
        self.widgets.contains_key(key)
    }

    /// Number of widgets in the arena.
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// A widget's base record.
    pub fn control(&self, key: WidgetKey) -> Option<&Control> {
        self.widgets.get(key).map(|slot| &slot.control)
    }

    /// A widget's behaviour, downcast to its concrete type.
    pub fn widget<T: Widget>(&self, key: WidgetKey) -> Option<&T> {
        self.widgets.get(key)?.widget.as_any().downcast_ref::<T>()
    }

    /// A widget's behaviour, downcast mutably.
    pub fn widget_mut<T: Widget>(&mut self, key: WidgetKey) -> Option<&mut T> {
        self.widgets
            .get_mut(key)?
            .widget
            .as_any_mut()
            .downcast_mut::<T>()
    }

    /// Run `f` with a concrete widget and its context, so widget-specific
    /// operations can reach the surface. `None` when the key is unknown or
    /// the widget is not a `T`.
    pub fn with_widget<T: Widget, R>(
        &mut self,
        key: WidgetKey,
        f: impl FnOnce(&mut T, &mut WidgetCx<'_>) -> R,
    ) -> Option<R> {
        self.with_cx(key, |widget, cx| {
            widget.as_any_mut().downcast_mut::<T>().map(|widget| f(widget, cx))
        })
        .flatten()
    }

    /// The widget bound to a surface node.
    pub fn widget_for_node(&self, node: NodeId) -> Option<WidgetKey> {
        self.bindings.get(node).copied()
    }

    // -----------------------------------------------------------------------
    // Queues
    // -----------------------------------------------------------------------

    /// Drain messages emitted by widgets.
    pub fn drain_messages(&mut self) -> Vec<Message> {
        self.messages.drain()
    }

    /// Drain lifecycle events.
    pub fn lifecycle_events(&mut self) -> Vec<LifecycleEvent> {
        self.lifecycle.pending_events()
    }

    pub fn lifecycle(&self) -> &LifecycleTracker {
        &self.lifecycle
    }

    /// Run the side effects deferred during the last event turn. Returns the
    /// number of tasks run.
    pub fn run_deferred(&mut self) -> usize {
        let tasks = self.deferred.drain();
        let count = tasks.len();
        for task in tasks {
            match task {
                DeferredTask::Select(node) => self.surface.select(node),
            }
        }
        count
    }

    /// Drop every widget, scope, binding and queued item and start from an
    /// empty surface. The config, registry and collaborators are kept.
    pub fn reset(&mut self) {
        self.surface = Surface::new();
        self.widgets.clear();
        self.scopes.clear();
        self.default_scope = self
            .scopes
            .insert(Scope::new(DEFAULT_SCOPE_ID, ScopeKind::Default));
        self.bindings.clear();
        self.messages.clear();
        self.deferred.clear();
        self.lifecycle.clear();
        tracing::debug!("engine reset");
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    /// Run `f` with a widget's behaviour and a context over its base record.
    pub(crate) fn with_cx<R>(
        &mut self,
        key: WidgetKey,
        f: impl FnOnce(&mut dyn Widget, &mut WidgetCx<'_>) -> R,
    ) -> Option<R> {
        let slot = self.widgets.get_mut(key)?;
        let mut cx = WidgetCx::new(
            key,
            &mut slot.control,
            &mut self.surface,
            &mut self.messages,
            &mut self.deferred,
        );
        Some(f(slot.widget.as_mut(), &mut cx))
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("widgets", &self.widgets.len())
            .field("scopes", &self.scopes.len())
            .field("nodes", &self.surface.len())
            .field("registry", &self.registry)
            .finish()
    }
}

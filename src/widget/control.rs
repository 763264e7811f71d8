//! The control base record every widget carries.
//!
//! [`Control`] holds the contract fields shared by all widgets: identity,
//! type tag, option bag, state flags, parent link, child map, surface
//! association and render bookkeeping. Parent/child links are only mutated by
//! the engine's composition operations.

use std::time::{Duration, Instant};

use indexmap::IndexMap;
use serde_json::Value;
use slotmap::new_key_type;

use super::state::{StateSet, WidgetState};
use crate::class_list;
use crate::id::make_guid_with;
use crate::options::{self, Options};
use crate::scope::ScopeId;
use crate::surface::{NodeId, Surface};

new_key_type! {
    /// Arena key of a live widget.
    pub struct WidgetKey;
}

/// Anything that owns a control map: a widget or a root scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Owner {
    Widget(WidgetKey),
    Scope(ScopeId),
}

impl From<WidgetKey> for Owner {
    fn from(key: WidgetKey) -> Self {
        Owner::Widget(key)
    }
}

impl From<ScopeId> for Owner {
    fn from(scope: ScopeId) -> Self {
        Owner::Scope(scope)
    }
}

/// Base fields of a widget.
#[derive(Debug, Clone)]
pub struct Control {
    id: String,
    widget_type: String,
    options: Options,
    state: StateSet,
    parent: Option<Owner>,
    control_map: IndexMap<String, WidgetKey>,
    main: Option<NodeId>,
    is_rendered: bool,
    render_started: Option<Instant>,
    render_finished: Option<Instant>,
    disposed: bool,
}

impl Control {
    /// Build a control from an option bag.
    ///
    /// When the options carry no non-empty `id`, one is generated with
    /// `id_prefix` and written back into the options.
    pub fn new(widget_type: impl Into<String>, options: &Options, id_prefix: &str) -> Self {
        let mut control = Self {
            id: String::new(),
            widget_type: widget_type.into(),
            options: Options::new(),
            state: StateSet::new(),
            parent: None,
            control_map: IndexMap::new(),
            main: None,
            is_rendered: false,
            render_started: None,
            render_finished: None,
            disposed: false,
        };
        control.ingest_options(options);
        if control.id.is_empty() {
            control.id = make_guid_with(id_prefix);
            control
                .options
                .insert("id".to_owned(), Value::String(control.id.clone()));
        }
        control
    }

    /// Copy `options` onto this control; later keys overwrite earlier ones.
    /// `id` and `type` are picked up when present and non-empty.
    pub fn ingest_options(&mut self, options: &Options) {
        options::merge(&mut self.options, options);
        if let Some(id) = options::get_str(options, "id").filter(|s| !s.is_empty()) {
            self.id = id;
        }
        if let Some(ty) = options::get_str(options, "type").filter(|s| !s.is_empty()) {
            self.widget_type = ty;
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn widget_type(&self) -> &str {
        &self.widget_type
    }

    /// Change the type tag used for modifier classes.
    pub fn set_widget_type(&mut self, widget_type: impl Into<String>) {
        self.widget_type = widget_type.into();
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Read one option.
    pub fn option(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }

    /// The owner this control is attached under.
    pub fn parent(&self) -> Option<Owner> {
        self.parent
    }

    /// Children keyed by id.
    pub fn control_map(&self) -> &IndexMap<String, WidgetKey> {
        &self.control_map
    }

    /// Child keys in insertion order.
    pub fn children(&self) -> Vec<WidgetKey> {
        self.control_map.values().copied().collect()
    }

    /// The surface node this control presents through.
    pub fn main(&self) -> Option<NodeId> {
        self.main
    }

    pub fn is_rendered(&self) -> bool {
        self.is_rendered
    }

    /// Mark the widget rendered. Concrete widgets that fully render
    /// themselves call this to skip the base render.
    pub fn mark_rendered(&mut self) {
        self.is_rendered = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn render_started(&self) -> Option<Instant> {
        self.render_started
    }

    pub fn render_finished(&self) -> Option<Instant> {
        self.render_finished
    }

    /// Time spent in the last render, if it completed.
    pub fn render_duration(&self) -> Option<Duration> {
        Some(self.render_finished?.duration_since(self.render_started?))
    }

    /// `ui-<type>` or `ui-<type>-<key>`.
    pub fn get_class(&self, key: Option<&str>) -> String {
        class_list::modifier(&self.widget_type, key)
    }

    /// The control id, optionally suffixed with `key`.
    pub fn get_id(&self, key: Option<&str>) -> String {
        match key {
            Some(key) => format!("{}{key}", self.id),
            None => self.id.clone(),
        }
    }

    // -----------------------------------------------------------------------
    // State
    // -----------------------------------------------------------------------

    /// Set a state flag and add its modifier class to the surface node.
    pub fn set_state(&mut self, surface: &mut Surface, state: impl Into<WidgetState>) {
        let state = state.into();
        let class = self.get_class(Some(state.as_str()));
        self.state.insert(state);
        if let Some(node) = self.main.and_then(|n| surface.get_mut(n)) {
            node.add_class(&class);
        }
    }

    /// Clear a state flag and remove its modifier class from the surface node.
    pub fn remove_state(&mut self, surface: &mut Surface, state: impl Into<WidgetState>) {
        let state = state.into();
        let class = self.get_class(Some(state.as_str()));
        self.state.remove(&state);
        if let Some(node) = self.main.and_then(|n| surface.get_mut(n)) {
            node.remove_class(&class);
        }
    }

    /// Whether a state flag is present.
    pub fn get_state(&self, state: impl Into<WidgetState>) -> bool {
        self.state.contains(&state.into())
    }

    /// All present state flags.
    pub fn states(&self) -> &StateSet {
        &self.state
    }

    pub fn is_disabled(&self) -> bool {
        self.state.contains(&WidgetState::Disabled)
    }

    pub fn is_readonly(&self) -> bool {
        self.state.contains(&WidgetState::Readonly)
    }

    /// Set or clear `disabled`.
    pub fn disable(&mut self, surface: &mut Surface, disabled: bool) {
        if disabled {
            self.set_state(surface, WidgetState::Disabled);
        } else {
            self.remove_state(surface, WidgetState::Disabled);
        }
    }

    /// Set or clear `readonly`.
    pub fn readonly(&mut self, surface: &mut Surface, readonly: bool) {
        if readonly {
            self.set_state(surface, WidgetState::Readonly);
        } else {
            self.remove_state(surface, WidgetState::Readonly);
        }
    }

    // -----------------------------------------------------------------------
    // Form helpers
    // -----------------------------------------------------------------------

    /// `formName` option, else `name` option, else the node's `name` attribute.
    pub fn default_form_name(&self, surface: &Surface) -> Option<String> {
        options::get_str(&self.options, "formName")
            .or_else(|| options::get_str(&self.options, "name"))
            .filter(|s| !s.is_empty())
            .or_else(|| {
                let node = surface.get(self.main?)?;
                node.attr("name").map(str::to_owned)
            })
    }

    /// Validation rules from the `rule` option (a scalar or an array).
    pub fn rules(&self) -> Vec<Value> {
        match self.options.get("rule") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(rules)) => rules.iter().filter(|r| !r.is_null()).cloned().collect(),
            Some(rule) => vec![rule.clone()],
        }
    }

    /// Whether any validation rule is configured.
    pub fn has_rules(&self) -> bool {
        !self.rules().is_empty()
    }

    // -----------------------------------------------------------------------
    // Engine-side mutation
    // -----------------------------------------------------------------------

    pub(crate) fn set_parent(&mut self, parent: Option<Owner>) {
        self.parent = parent;
    }

    pub(crate) fn control_map_mut(&mut self) -> &mut IndexMap<String, WidgetKey> {
        &mut self.control_map
    }

    pub(crate) fn set_main(&mut self, main: Option<NodeId>) {
        self.main = main;
    }

    pub(crate) fn begin_render(&mut self) {
        self.render_started = Some(Instant::now());
        self.render_finished = None;
    }

    pub(crate) fn end_render(&mut self) {
        self.render_finished = Some(Instant::now());
    }

    pub(crate) fn mark_disposed(&mut self) {
        self.is_rendered = false;
        self.disposed = true;
    }
}

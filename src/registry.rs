//! Widget factory: constructors registered under type names.

use indexmap::IndexMap;

use crate::options::Options;
use crate::widget::Widget;

/// Builds a widget's behaviour from its option bag.
pub type Constructor = Box<dyn Fn(&Options) -> Box<dyn Widget>>;

/// Table of widget constructors keyed by type name.
#[derive(Default)]
pub struct WidgetRegistry {
    constructors: IndexMap<String, Constructor>,
}

impl WidgetRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the built-in widgets (`Panel`, `TextInput`).
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        crate::widgets::register_builtins(&mut registry);
        registry
    }

    /// Register a constructor, replacing any previous one for the same type.
    pub fn register<F>(&mut self, widget_type: impl Into<String>, constructor: F)
    where
        F: Fn(&Options) -> Box<dyn Widget> + 'static,
    {
        self.constructors
            .insert(widget_type.into(), Box::new(constructor));
    }

    /// Builder form of [`register`](Self::register).
    pub fn with<F>(mut self, widget_type: impl Into<String>, constructor: F) -> Self
    where
        F: Fn(&Options) -> Box<dyn Widget> + 'static,
    {
        self.register(widget_type, constructor);
        self
    }

    /// The constructor for `widget_type`.
    pub fn get(&self, widget_type: &str) -> Option<&Constructor> {
        self.constructors.get(widget_type)
    }

    pub fn contains(&self, widget_type: &str) -> bool {
        self.constructors.contains_key(widget_type)
    }

    /// Registered type names in registration order.
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.constructors.keys().map(String::as_str)
    }

    /// Remove every constructor.
    pub fn clear(&mut self) {
        self.constructors.clear();
    }
}

impl std::fmt::Debug for WidgetRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetRegistry")
            .field("types", &self.types().collect::<Vec<_>>())
            .finish()
    }
}

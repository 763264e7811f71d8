//! Surface node types: NodeId, NodeData.

use indexmap::IndexMap;
use slotmap::new_key_type;

use crate::class_list;

new_key_type! {
    /// Unique identifier for a surface node. Copy, lightweight (u64).
    pub struct NodeId;
}

/// Data associated with a single surface node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    /// Lowercase element tag (e.g. "div", "input").
    pub tag: String,
    /// Optional node identifier.
    pub id: Option<String>,
    /// Whether this node is displayed.
    pub visible: bool,
    /// Text content.
    pub text: String,
    /// Form value, for input-like nodes.
    pub value: String,
    /// Whether the node refuses user input.
    pub disabled: bool,
    /// Whether the node's value is read-only.
    pub readonly: bool,
    /// Whether the node's text is currently selected.
    pub selected: bool,
    attributes: IndexMap<String, String>,
    style: IndexMap<String, String>,
    class_name: String,
}

impl NodeData {
    /// Create a new `NodeData` with the given tag and sensible defaults.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_lowercase(),
            id: None,
            visible: true,
            text: String::new(),
            value: String::new(),
            disabled: false,
            readonly: false,
            selected: false,
            attributes: IndexMap::new(),
            style: IndexMap::new(),
            class_name: String::new(),
        }
    }

    /// Set the node id (builder).
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set an attribute (builder).
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Add class tokens (builder).
    pub fn with_class(mut self, classes: &str) -> Self {
        self.add_class(classes);
        self
    }

    /// Set the text content (builder).
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the form value (builder).
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Read an attribute.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Set an attribute, replacing any previous value.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Remove an attribute, returning its previous value.
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        self.attributes.shift_remove(name)
    }

    /// Iterate over `(name, value)` attribute pairs in insertion order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Read a style property.
    pub fn style(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }

    /// Set a style property.
    pub fn set_style(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.style.insert(property.into(), value.into());
    }

    /// The raw class string.
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Replace the raw class string.
    pub fn set_class_name(&mut self, class_name: impl Into<String>) {
        self.class_name = class_name.into();
    }

    /// Check whether this node carries a given class token.
    pub fn has_class(&self, class: &str) -> bool {
        class_list::has_class(&self.class_name, class)
    }

    /// Add class tokens. Tokens already present are left in place.
    pub fn add_class(&mut self, classes: &str) {
        self.class_name = class_list::add_class(&self.class_name, classes);
    }

    /// Remove every occurrence of the given class tokens.
    pub fn remove_class(&mut self, classes: &str) {
        self.class_name = class_list::remove_class(&self.class_name, classes);
    }
}

//! Engine configuration.

use crate::id::DEFAULT_ID_PREFIX;

/// Default name of the declarative attribute scanned by `Engine::init`.
pub const DEFAULT_UI_ATTRIBUTE: &str = "ui";

/// Default bound on upward walks over the surface tree.
pub const DEFAULT_MAX_ANCESTOR_DEPTH: usize = 256;

/// Configuration for an [`Engine`](crate::engine::Engine).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Attribute whose micro-grammar drives declarative creation.
    pub ui_attribute: String,
    /// Prefix for generated widget ids.
    pub id_prefix: String,
    /// Maximum number of ancestors visited when searching for an owning widget.
    pub max_ancestor_depth: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ui_attribute: DEFAULT_UI_ATTRIBUTE.to_owned(),
            id_prefix: DEFAULT_ID_PREFIX.to_owned(),
            max_ancestor_depth: DEFAULT_MAX_ANCESTOR_DEPTH,
        }
    }
}

impl EngineConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the declarative attribute name (builder).
    pub fn with_ui_attribute(mut self, name: impl Into<String>) -> Self {
        self.ui_attribute = name.into();
        self
    }

    /// Set the generated id prefix (builder).
    pub fn with_id_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.id_prefix = prefix.into();
        self
    }

    /// Set the ancestor walk bound (builder). Zero limits the search to the
    /// immediate surface parent.
    pub fn with_max_ancestor_depth(mut self, depth: usize) -> Self {
        self.max_ancestor_depth = depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = EngineConfig::new();
        assert_eq!(config.ui_attribute, "ui");
        assert_eq!(config.id_prefix, "_innerui_");
        assert_eq!(config.max_ancestor_depth, 256);
    }

    #[test]
    fn builder_chain() {
        let config = EngineConfig::new()
            .with_ui_attribute("data-ui")
            .with_id_prefix("w")
            .with_max_ancestor_depth(4);
        assert_eq!(config.ui_attribute, "data-ui");
        assert_eq!(config.id_prefix, "w");
        assert_eq!(config.max_ancestor_depth, 4);
    }
}

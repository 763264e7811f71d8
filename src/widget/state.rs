//! Visual interaction states.

use std::collections::BTreeSet;
use std::fmt;

/// A state flag a widget can carry. The five reserved names have variants;
/// any other name is kept as [`WidgetState::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WidgetState {
    Hover,
    Press,
    Active,
    Disabled,
    Readonly,
    Custom(String),
}

impl WidgetState {
    /// The state name, as used in modifier classes.
    pub fn as_str(&self) -> &str {
        match self {
            WidgetState::Hover => "hover",
            WidgetState::Press => "press",
            WidgetState::Active => "active",
            WidgetState::Disabled => "disabled",
            WidgetState::Readonly => "readonly",
            WidgetState::Custom(name) => name,
        }
    }
}

impl From<&str> for WidgetState {
    fn from(name: &str) -> Self {
        match name {
            "hover" => WidgetState::Hover,
            "press" => WidgetState::Press,
            "active" => WidgetState::Active,
            "disabled" => WidgetState::Disabled,
            "readonly" => WidgetState::Readonly,
            other => WidgetState::Custom(other.to_owned()),
        }
    }
}

impl From<String> for WidgetState {
    fn from(name: String) -> Self {
        WidgetState::from(name.as_str())
    }
}

impl fmt::Display for WidgetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The set of states currently present on a widget.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateSet(BTreeSet<WidgetState>);

impl StateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a flag. Returns `true` if it was absent.
    pub fn insert(&mut self, state: WidgetState) -> bool {
        self.0.insert(state)
    }

    /// Clear a flag. Returns `true` if it was present.
    pub fn remove(&mut self, state: &WidgetState) -> bool {
        self.0.remove(state)
    }

    pub fn contains(&self, state: &WidgetState) -> bool {
        self.0.contains(state)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WidgetState> {
        self.0.iter()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_names_parse_to_variants() {
        assert_eq!(WidgetState::from("hover"), WidgetState::Hover);
        assert_eq!(WidgetState::from("readonly"), WidgetState::Readonly);
        assert_eq!(WidgetState::from("selected"), WidgetState::Custom("selected".into()));
    }

    #[test]
    fn display_matches_name() {
        assert_eq!(WidgetState::Press.to_string(), "press");
        assert_eq!(WidgetState::Custom("open".into()).to_string(), "open");
    }

    #[test]
    fn set_is_idempotent() {
        let mut set = StateSet::new();
        assert!(set.insert(WidgetState::Hover));
        assert!(!set.insert(WidgetState::Hover));
        assert!(set.contains(&WidgetState::Hover));
        assert!(set.remove(&WidgetState::Hover));
        assert!(!set.remove(&WidgetState::Hover));
        assert!(set.is_empty());
    }
}

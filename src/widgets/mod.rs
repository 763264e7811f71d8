//! Built-in widgets: Panel, TextInput.

pub mod panel;
pub mod text_input;

pub use panel::Panel;
pub use text_input::TextInput;

use crate::registry::WidgetRegistry;

/// Register the built-in widget types.
pub fn register_builtins(registry: &mut WidgetRegistry) {
    registry.register("Panel", |_| Box::new(Panel::new()));
    registry.register("TextInput", |options| Box::new(TextInput::from_options(options)));
}

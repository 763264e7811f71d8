//! TextInput widget: a form control bound to a text input or textarea node.
//!
//! Supports a virtual placeholder value shown while the field is empty,
//! select-on-focus, and submit on Enter.

use std::any::Any;

use serde_json::Value;

use crate::error::WidgetError;
use crate::event::{DeferredTask, Key, ListenerSet, MessageKind, SurfaceEvent};
use crate::options::{self, Options};
use crate::surface::Surface;
use crate::widget::control::Control;
use crate::widget::traits::{FormControl, Widget, WidgetCx};

const VIRTUAL: &str = "virtual";

/// A single-line or multi-line text field.
///
/// Bound to an `input` node of type `text` or `password` it becomes widget
/// type `text`; bound to a `textarea` it becomes `textarea`. Any other node
/// gets the base render only.
///
/// While the field is empty and a `virtualValue` is configured, the node
/// shows that value with the `virtual` modifier class and the form value
/// reads as empty.
#[derive(Debug, Default)]
pub struct TextInput {
    virtual_value: Option<String>,
    auto_select: bool,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `virtualValue` and `autoSelect` from an option bag.
    pub fn from_options(options: &Options) -> Self {
        Self {
            virtual_value: options::get_str(options, "virtualValue").filter(|v| !v.is_empty()),
            auto_select: options::is_truthy(options, "autoSelect"),
        }
    }

    /// Set the virtual placeholder value (builder pattern).
    pub fn with_virtual_value(mut self, value: impl Into<String>) -> Self {
        self.virtual_value = Some(value.into()).filter(|v: &String| !v.is_empty());
        self
    }

    /// Select the field's content on focus (builder pattern).
    pub fn with_auto_select(mut self, auto_select: bool) -> Self {
        self.auto_select = auto_select;
        self
    }

    pub fn virtual_value(&self) -> Option<&str> {
        self.virtual_value.as_deref()
    }

    pub fn auto_select(&self) -> bool {
        self.auto_select
    }

    /// Set the node's `title` attribute.
    pub fn set_title(&self, cx: &mut WidgetCx<'_>, title: impl Into<String>) {
        if let Some(node) = cx.main_node_mut() {
            node.set_attr("title", title);
        }
    }

    /// Select the field's content now, without waiting for focus.
    pub fn focus_and_select(&self, cx: &mut WidgetCx<'_>) {
        if let Some(main) = cx.main() {
            cx.surface.select(main);
        }
    }

    fn show_virtual(&self, cx: &mut WidgetCx<'_>) {
        let Some(virtual_value) = self.virtual_value.clone() else {
            return;
        };
        let class = cx.control.get_class(Some(VIRTUAL));
        if let Some(node) = cx.main_node_mut() {
            node.value = virtual_value;
            node.add_class(&class);
        }
    }

    fn hide_virtual(cx: &mut WidgetCx<'_>) {
        let class = cx.control.get_class(Some(VIRTUAL));
        if let Some(node) = cx.main_node_mut() {
            node.remove_class(&class);
        }
    }

    fn showing_virtual(control: &Control, surface: &Surface) -> bool {
        let class = control.get_class(Some(VIRTUAL));
        control
            .main()
            .and_then(|main| surface.get(main))
            .is_some_and(|node| node.has_class(&class))
    }

    fn current_text(cx: &WidgetCx<'_>) -> String {
        cx.main_node().map(|node| node.value.clone()).unwrap_or_default()
    }
}

impl Widget for TextInput {
    fn render(&mut self, cx: &mut WidgetCx<'_>) -> Result<(), WidgetError> {
        let Some(node) = cx.main_node() else {
            return Ok(());
        };
        let kind = match (node.tag.as_str(), node.attr("type")) {
            ("input", None | Some("text") | Some("password")) => Some("text"),
            ("textarea", _) => Some("textarea"),
            _ => None,
        };

        if let Some(kind) = kind {
            cx.control.set_widget_type(kind);
            cx.base_render();

            let options = cx.control.options().clone();
            if let Some(node) = cx.main_node_mut() {
                for dimension in ["width", "height"] {
                    if let Some(size) = options::get_str(&options, dimension).filter(|s| !s.is_empty()) {
                        node.set_style(dimension, format!("{size}px"));
                    }
                }
            }
            cx.listen(ListenerSet::KEY_PRESS | ListenerSet::FOCUS | ListenerSet::BLUR);

            let readonly = options::is_truthy(&options, "readOnly");
            cx.control.readonly(cx.surface, readonly);
            self.on_readonly(cx, readonly);
        } else {
            cx.base_render();
        }

        let value = match cx.control.option("value").and_then(options::value_to_string) {
            Some(value) => value,
            None => Self::current_text(cx),
        };
        if value.is_empty() && self.virtual_value.is_some() {
            self.show_virtual(cx);
        } else if let Some(node) = cx.main_node_mut() {
            node.value = value;
        }
        Ok(())
    }

    fn handle_event(&mut self, cx: &mut WidgetCx<'_>, event: SurfaceEvent) {
        match event {
            SurfaceEvent::Focus => {
                cx.emit(MessageKind::Focus);
                Self::hide_virtual(cx);
                let text = Self::current_text(cx);
                let select = self.auto_select || self.virtual_value.as_deref() == Some(text.as_str());
                if let Some(main) = cx.main().filter(|_| select) {
                    cx.defer(DeferredTask::Select(main));
                }
            }
            SurfaceEvent::Blur => {
                cx.emit(MessageKind::Blur);
                let text = Self::current_text(cx);
                if text.is_empty() || self.virtual_value.as_deref() == Some(text.as_str()) {
                    self.show_virtual(cx);
                }
            }
            SurfaceEvent::KeyPress(Key::Enter) => cx.emit(MessageKind::Submit),
            _ => {}
        }
    }

    fn on_disable(&mut self, cx: &mut WidgetCx<'_>, disabled: bool) {
        if let Some(node) = cx.main_node_mut() {
            node.disabled = disabled;
        }
    }

    fn on_readonly(&mut self, cx: &mut WidgetCx<'_>, readonly: bool) {
        if let Some(node) = cx.main_node_mut() {
            node.readonly = readonly;
        }
    }

    fn on_dispose(&mut self, cx: &mut WidgetCx<'_>) {
        cx.unlisten(ListenerSet::KEY_PRESS | ListenerSet::FOCUS | ListenerSet::BLUR);
    }

    fn form(&self) -> Option<&dyn FormControl> {
        Some(self)
    }

    fn form_mut(&mut self) -> Option<&mut dyn FormControl> {
        Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl FormControl for TextInput {
    fn value(&self, control: &Control, surface: &Surface) -> Value {
        if Self::showing_virtual(control, surface) {
            return Value::String(String::new());
        }
        let text = control
            .main()
            .and_then(|main| surface.get(main))
            .map(|node| node.value.clone())
            .unwrap_or_default();
        Value::String(text)
    }

    fn set_value(&mut self, cx: &mut WidgetCx<'_>, value: Value) {
        let text = options::value_to_string(&value).unwrap_or_default();
        if text.is_empty() && self.virtual_value.is_some() {
            self.show_virtual(cx);
            return;
        }
        Self::hide_virtual(cx);
        if let Some(node) = cx.main_node_mut() {
            node.value = text;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Engine;
    use crate::event::Message;
    use crate::surface::{NodeData, NodeId};
    use crate::widget::WidgetKey;
    use serde_json::json;

    fn field(engine: &mut Engine, node: NodeData) -> (WidgetKey, NodeId) {
        let root = engine.surface().root();
        let node = engine.surface_mut().insert_child(root, node).unwrap();
        engine.init(None, None, None).unwrap();
        (engine.widget_for_node(node).unwrap(), node)
    }

    fn text(ui: &str) -> NodeData {
        NodeData::new("input")
            .with_attr("type", "text")
            .with_attr("name", "q")
            .with_attr("ui", ui)
    }

    fn kinds(messages: &[Message]) -> Vec<MessageKind> {
        messages.iter().map(|m| m.kind.clone()).collect()
    }

    #[test]
    fn render_configures_node() {
        let mut engine = Engine::new();
        let (key, node) = field(
            &mut engine,
            text("type:TextInput;id:q;width:120;readOnly:1;value:hi"),
        );
        let control = engine.control(key).unwrap();
        assert_eq!(control.widget_type(), "text");
        assert!(control.is_readonly());

        let data = engine.surface().get(node).unwrap();
        assert!(data.has_class("ui-text"));
        assert!(data.readonly);
        assert_eq!(data.style("width"), Some("120px"));
        assert_eq!(data.style("height"), None);
        assert_eq!(data.value, "hi");
        assert!(engine
            .surface()
            .listeners(node)
            .contains(ListenerSet::FOCUS | ListenerSet::BLUR | ListenerSet::KEY_PRESS));
    }

    #[test]
    fn textarea_and_other_nodes() {
        let mut engine = Engine::new();
        let (area, _) = field(
            &mut engine,
            NodeData::new("textarea").with_attr("ui", "type:TextInput;id:area"),
        );
        assert_eq!(engine.control(area).unwrap().widget_type(), "textarea");

        let mut engine = Engine::new();
        let (other, node) = field(
            &mut engine,
            NodeData::new("input")
                .with_attr("type", "checkbox")
                .with_attr("ui", "type:TextInput;id:cb"),
        );
        assert_eq!(engine.control(other).unwrap().widget_type(), "TextInput");
        assert!(engine.surface().listeners(node).is_empty());
    }

    #[test]
    fn virtual_value_round_trip() {
        let mut engine = Engine::new();
        let (key, node) = field(&mut engine, text("type:TextInput;id:q;virtualValue:Search"));

        let data = engine.surface().get(node).unwrap();
        assert_eq!(data.value, "Search");
        assert!(data.has_class("ui-text-virtual"));
        assert_eq!(engine.value(key), Some(json!("")));

        engine.dispatch(node, SurfaceEvent::Focus);
        assert!(!engine.surface().get(node).unwrap().has_class("ui-text-virtual"));
        assert_eq!(engine.run_deferred(), 1);
        assert_eq!(engine.surface().selection(), Some(node));

        engine.dispatch(node, SurfaceEvent::Blur);
        assert!(engine.surface().get(node).unwrap().has_class("ui-text-virtual"));
        assert_eq!(
            kinds(&engine.drain_messages()),
            [MessageKind::Focus, MessageKind::Blur]
        );
    }

    #[test]
    fn set_value_clears_virtual() {
        let mut engine = Engine::new();
        let (key, node) = field(&mut engine, text("type:TextInput;id:q;virtualValue:Search"));

        engine.set_value(key, json!("rust")).unwrap();
        let data = engine.surface().get(node).unwrap();
        assert!(!data.has_class("ui-text-virtual"));
        assert_eq!(engine.value(key), Some(json!("rust")));

        engine.dispatch(node, SurfaceEvent::Focus);
        assert_eq!(engine.run_deferred(), 0);

        engine.set_value(key, json!("")).unwrap();
        assert_eq!(engine.value(key), Some(json!("")));
        assert_eq!(engine.surface().get(node).unwrap().value, "Search");
    }

    #[test]
    fn auto_select_and_submit() {
        let mut engine = Engine::new();
        let (_, node) = field(&mut engine, text("type:TextInput;id:q;autoSelect:true;value:x"));

        engine.dispatch(node, SurfaceEvent::Focus);
        assert_eq!(engine.run_deferred(), 1);
        engine.dispatch(node, SurfaceEvent::KeyPress(Key::Char('a')));
        engine.dispatch(node, SurfaceEvent::KeyPress(Key::Enter));
        assert_eq!(
            kinds(&engine.drain_messages()),
            [MessageKind::Focus, MessageKind::Submit]
        );
    }

    #[test]
    fn disable_mirrors_onto_node() {
        let mut engine = Engine::new();
        let (key, node) = field(&mut engine, text("type:TextInput;id:q"));
        engine.disable(key, true).unwrap();
        assert!(engine.surface().get(node).unwrap().disabled);
        engine.enable(key).unwrap();
        assert!(!engine.surface().get(node).unwrap().disabled);
    }

    #[test]
    fn dispose_unlistens() {
        let mut engine = Engine::new();
        let (key, node) = field(&mut engine, text("type:TextInput;id:q"));
        engine.dispose(key).unwrap();
        assert!(engine.surface().listeners(node).is_empty());
        assert_eq!(engine.dispatch(node, SurfaceEvent::Focus), 0);
    }

    #[test]
    fn title_and_immediate_select() {
        let mut engine = Engine::new();
        let (key, node) = field(&mut engine, text("type:TextInput;id:q;value:abc"));

        engine
            .with_widget::<TextInput, _>(key, |input, cx| input.set_title(cx, "Query"))
            .unwrap();
        assert_eq!(engine.surface().get(node).unwrap().attr("title"), Some("Query"));

        assert_eq!(engine.surface().selection(), None);
        engine
            .with_widget::<TextInput, _>(key, |input, cx| input.focus_and_select(cx))
            .unwrap();
        assert_eq!(engine.surface().selection(), Some(node));
        assert_eq!(engine.run_deferred(), 0);

        assert!(engine
            .with_widget::<crate::widgets::Panel, _>(key, |_, _| ())
            .is_none());
    }
}

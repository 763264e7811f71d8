//! Widget capability traits and the context handed to widget hooks.
//!
//! A concrete widget implements [`Widget`]. Every hook has a default, so a
//! widget only overrides what it needs. Form-bearing widgets additionally
//! expose a [`FormControl`] through [`Widget::form`].

use std::any::Any;

use serde_json::Value;

use super::control::{Control, WidgetKey};
use super::state::WidgetState;
use crate::error::WidgetError;
use crate::event::{DeferredQueue, DeferredTask, EventQueue, ListenerSet, Message, MessageKind, SurfaceEvent};
use crate::options;
use crate::surface::{NodeData, NodeId, Surface};

// ---------------------------------------------------------------------------
// WidgetCx
// ---------------------------------------------------------------------------

/// Mutable view of one widget's base record and the engine resources its
/// hooks may touch.
pub struct WidgetCx<'a> {
    key: WidgetKey,
    /// The widget's base record.
    pub control: &'a mut Control,
    /// The rendering surface.
    pub surface: &'a mut Surface,
    messages: &'a mut EventQueue,
    deferred: &'a mut DeferredQueue,
}

impl<'a> WidgetCx<'a> {
    pub(crate) fn new(
        key: WidgetKey,
        control: &'a mut Control,
        surface: &'a mut Surface,
        messages: &'a mut EventQueue,
        deferred: &'a mut DeferredQueue,
    ) -> Self {
        Self {
            key,
            control,
            surface,
            messages,
            deferred,
        }
    }

    /// Arena key of the widget.
    pub fn key(&self) -> WidgetKey {
        self.key
    }

    /// The widget's surface node.
    pub fn main(&self) -> Option<NodeId> {
        self.control.main()
    }

    /// The widget's surface node data.
    pub fn main_node(&self) -> Option<&NodeData> {
        self.surface.get(self.control.main()?)
    }

    /// The widget's surface node data, mutably.
    pub fn main_node_mut(&mut self) -> Option<&mut NodeData> {
        self.surface.get_mut(self.control.main()?)
    }

    pub fn set_state(&mut self, state: impl Into<WidgetState>) {
        self.control.set_state(self.surface, state);
    }

    pub fn remove_state(&mut self, state: impl Into<WidgetState>) {
        self.control.remove_state(self.surface, state);
    }

    /// Register listeners on the widget's node.
    pub fn listen(&mut self, kinds: ListenerSet) {
        if let Some(main) = self.control.main() {
            self.surface.listen(main, kinds);
        }
    }

    /// Unregister listeners on the widget's node.
    pub fn unlisten(&mut self, kinds: ListenerSet) {
        if let Some(main) = self.control.main() {
            self.surface.unlisten(main, kinds);
        }
    }

    /// Emit a message for the embedding application.
    pub fn emit(&mut self, kind: MessageKind) {
        self.messages
            .push(Message::new(self.key, self.control.id(), kind));
    }

    /// Schedule a side effect for after the current event turn.
    pub fn defer(&mut self, task: DeferredTask) {
        self.deferred.push(task);
    }

    /// The base render: add `ui-<type>` to the node, wire pointer listeners
    /// when the `autoState` option is truthy, and mark the widget rendered.
    ///
    /// Does nothing when the widget has no surface node.
    pub fn base_render(&mut self) {
        let Some(main) = self.control.main() else {
            return;
        };
        let class = self.control.get_class(None);
        if let Some(node) = self.surface.get_mut(main) {
            node.add_class(&class);
        }
        if options::is_truthy(self.control.options(), "autoState") {
            self.surface.listen(main, ListenerSet::POINTER);
        }
        self.control.mark_rendered();
    }
}

// ---------------------------------------------------------------------------
// Widget
// ---------------------------------------------------------------------------

/// Behaviour of a concrete widget type.
pub trait Widget: Any {
    /// Produce the widget's presentation. If this does not mark the widget
    /// rendered, the engine runs [`WidgetCx::base_render`] afterwards.
    fn render(&mut self, _cx: &mut WidgetCx<'_>) -> Result<(), WidgetError> {
        Ok(())
    }

    /// React to a surface notification on a node this widget listens on.
    /// Pointer state transitions have already been applied when this runs.
    fn handle_event(&mut self, _cx: &mut WidgetCx<'_>, _event: SurfaceEvent) {}

    /// Called after `disabled` was set or cleared.
    fn on_disable(&mut self, _cx: &mut WidgetCx<'_>, _disabled: bool) {}

    /// Called after `readonly` was set or cleared.
    fn on_readonly(&mut self, _cx: &mut WidgetCx<'_>, _readonly: bool) {}

    /// Called during dispose, after the children were disposed and before the
    /// surface association is severed.
    fn on_dispose(&mut self, _cx: &mut WidgetCx<'_>) {}

    /// The form capability, for widgets that carry a named value.
    fn form(&self) -> Option<&dyn FormControl> {
        None
    }

    /// The form capability, mutably.
    fn form_mut(&mut self) -> Option<&mut dyn FormControl> {
        None
    }

    /// Downcast to `&dyn Any` for runtime type inspection.
    fn as_any(&self) -> &dyn Any;

    /// Downcast to `&mut dyn Any` for mutable runtime type inspection.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// A widget that carries a named value.
pub trait FormControl {
    /// The name under which the value is reported.
    fn form_name(&self, control: &Control, surface: &Surface) -> Option<String> {
        control.default_form_name(surface)
    }

    /// The current value.
    fn value(&self, control: &Control, surface: &Surface) -> Value;

    /// Replace the current value.
    fn set_value(&mut self, cx: &mut WidgetCx<'_>, value: Value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;
    use serde_json::json;
    use slotmap::SlotMap;

    struct Plain;

    impl Widget for Plain {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    struct Harness {
        key: WidgetKey,
        control: Control,
        surface: Surface,
        messages: EventQueue,
        deferred: DeferredQueue,
    }

    impl Harness {
        fn new(options: Value) -> Self {
            let mut sm: SlotMap<WidgetKey, ()> = SlotMap::with_key();
            let options = match options {
                Value::Object(map) => map,
                _ => Options::new(),
            };
            let mut surface = Surface::new();
            let node = surface.create_element(NodeData::new("div"));
            let mut control = Control::new("Panel", &options, "_t_");
            control.set_main(Some(node));
            Self {
                key: sm.insert(()),
                control,
                surface,
                messages: EventQueue::new(),
                deferred: DeferredQueue::new(),
            }
        }

        fn cx(&mut self) -> WidgetCx<'_> {
            WidgetCx::new(
                self.key,
                &mut self.control,
                &mut self.surface,
                &mut self.messages,
                &mut self.deferred,
            )
        }
    }

    #[test]
    fn default_hooks_are_noops() {
        let mut h = Harness::new(json!({"id": "p"}));
        let mut w = Plain;
        assert!(w.render(&mut h.cx()).is_ok());
        w.handle_event(&mut h.cx(), SurfaceEvent::Focus);
        assert!(!h.control.is_rendered());
        assert!(w.form().is_none());
        assert!(w.form_mut().is_none());
    }

    #[test]
    fn base_render_adds_class_and_marks_rendered() {
        let mut h = Harness::new(json!({"id": "p"}));
        h.cx().base_render();
        let main = h.control.main().unwrap();
        assert!(h.surface.get(main).unwrap().has_class("ui-panel"));
        assert!(h.surface.listeners(main).is_empty());
        assert!(h.control.is_rendered());
    }

    #[test]
    fn base_render_wires_pointer_listeners_with_auto_state() {
        let mut h = Harness::new(json!({"id": "p", "autoState": "1"}));
        h.cx().base_render();
        let main = h.control.main().unwrap();
        assert_eq!(h.surface.listeners(main), ListenerSet::POINTER);
    }

    #[test]
    fn base_render_without_node_is_noop() {
        let mut h = Harness::new(json!({"id": "p"}));
        h.control.set_main(None);
        h.cx().base_render();
        assert!(!h.control.is_rendered());
    }

    #[test]
    fn emit_and_defer() {
        let mut h = Harness::new(json!({"id": "p"}));
        let main = h.control.main().unwrap();
        {
            let mut cx = h.cx();
            cx.emit(MessageKind::Submit);
            cx.defer(DeferredTask::Select(main));
        }
        let messages = h.messages.drain();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender_id, "p");
        assert_eq!(messages[0].kind, MessageKind::Submit);
        assert_eq!(h.deferred.drain(), vec![DeferredTask::Select(main)]);
    }

    #[test]
    fn as_any_downcast() {
        let w: Box<dyn Widget> = Box::new(Plain);
        assert!(w.as_any().downcast_ref::<Plain>().is_some());
    }
}

//! Routing surface notifications to widgets.
//!
//! A notification is delivered along its bubble path (or to the target
//! alone for focus and blur). Each node on the path that listens for the
//! event kind and is bound to a live widget gets the pointer state
//! transition applied, then the widget's own handler.

use super::Engine;
use crate::event::{bubble_path, SurfaceEvent};
use crate::surface::NodeId;
use crate::widget::{WidgetCx, WidgetKey, WidgetState};

impl Engine {
    /// Deliver a surface notification. Returns the number of widgets that
    /// handled it.
    pub fn dispatch(&mut self, node: NodeId, event: SurfaceEvent) -> usize {
        let path = if event.bubbles() {
            bubble_path(&self.surface, node, self.config.max_ancestor_depth)
        } else if self.surface.contains(node) {
            vec![node]
        } else {
            Vec::new()
        };

        let listener = event.kind().listener();
        let mut handled = 0;
        for current in path {
            if !self.surface.listeners(current).contains(listener) {
                continue;
            }
            let Some(&key) = self.bindings.get(current) else {
                continue;
            };
            if self.deliver(key, event) {
                handled += 1;
            }
        }
        handled
    }

    fn deliver(&mut self, key: WidgetKey, event: SurfaceEvent) -> bool {
        self.with_cx(key, |widget, cx| {
            if cx.control.is_disposed() {
                return false;
            }
            apply_pointer_transition(cx, event);
            widget.handle_event(cx, event);
            true
        })
        .unwrap_or(false)
    }
}

/// Hover tracks pointer presence and press tracks the button, neither
/// changing while disabled. Readonly also blocks hover.
fn apply_pointer_transition(cx: &mut WidgetCx<'_>, event: SurfaceEvent) {
    let disabled = cx.control.is_disabled();
    let readonly = cx.control.is_readonly();
    match event {
        SurfaceEvent::PointerEnter if !disabled && !readonly => {
            cx.set_state(WidgetState::Hover);
        }
        SurfaceEvent::PointerLeave if !disabled && !readonly => {
            cx.remove_state(WidgetState::Hover);
            cx.remove_state(WidgetState::Press);
        }
        SurfaceEvent::PointerDown if !disabled => cx.set_state(WidgetState::Press),
        SurfaceEvent::PointerUp if !disabled => cx.remove_state(WidgetState::Press),
        _ => {}
    }
}

//! Teardown.

use tracing::debug;

use super::Engine;
use crate::error::EngineError;
use crate::widget::WidgetKey;

impl Engine {
    /// Dispose a widget and, first, all of its descendants.
    ///
    /// Clears the widget's listeners and surface content, severs the
    /// node binding and removes the widget from its owner's map. The arena
    /// slot stays behind marked disposed; see [`release`](Self::release).
    /// Disposing twice is a no-op.
    pub fn dispose(&mut self, key: WidgetKey) -> Result<(), EngineError> {
        let control = self.control(key).ok_or(EngineError::UnknownWidget(key))?;
        if control.is_disposed() {
            return Ok(());
        }
        let children = control.children();
        for &child in &children {
            self.dispose(child)?;
        }

        self.with_cx(key, |widget, cx| widget.on_dispose(cx));

        let slot = &mut self.widgets[key];
        slot.disposed_children = children;
        slot.control.control_map_mut().clear();
        if let Some(main) = slot.control.main() {
            self.surface.clear_listeners(main);
            self.surface.clear_content(main);
            if self.bindings.get(main) == Some(&key) {
                self.bindings.remove(main);
            }
        }
        slot.control.set_main(None);
        slot.control.mark_disposed();
        let id = slot.control.id().to_owned();

        self.detach_from_parent(key);
        self.lifecycle.on_dispose(key);
        debug!(id = %id, "widget disposed");
        Ok(())
    }

    /// Dispose a widget, then free the arena slots of it and its former
    /// descendants. Their keys become invalid.
    ///
    /// Works on a widget that was already disposed: the descendants it held
    /// at dispose time are freed too.
    pub fn release(&mut self, key: WidgetKey) -> Result<(), EngineError> {
        if !self.widgets.contains_key(key) {
            return Err(EngineError::UnknownWidget(key));
        }
        self.dispose(key)?;

        let mut stack = vec![key];
        while let Some(key) = stack.pop() {
            if let Some(slot) = self.widgets.remove(key) {
                stack.extend(slot.disposed_children);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::ListenerSet;
    use crate::options::Options;
    use crate::surface::NodeData;
    use crate::widget::LifecycleEvent;
    use serde_json::json;

    fn tree(engine: &mut Engine) -> (WidgetKey, WidgetKey) {
        let root = engine.surface().root();
        let s = engine.surface_mut();
        let outer = s
            .insert_child(
                root,
                NodeData::new("div").with_attr("ui", "type:Panel;id:outer;autoState:true"),
            )
            .unwrap();
        s.insert_child(outer, NodeData::new("div").with_attr("ui", "type:Panel;id:inner"))
            .unwrap();
        engine.init(None, None, None).unwrap();
        (engine.get("outer").unwrap(), engine.get("inner").unwrap())
    }

    #[test]
    fn dispose_tears_down_subtree() {
        let mut engine = Engine::new();
        let (outer, inner) = tree(&mut engine);
        let outer_main = engine.control(outer).unwrap().main().unwrap();
        assert!(engine.surface().listeners(outer_main).contains(ListenerSet::POINTER));

        engine.dispose(outer).unwrap();

        let control = engine.control(outer).unwrap();
        assert!(control.is_disposed());
        assert!(!control.is_rendered());
        assert!(control.main().is_none());
        assert!(control.control_map().is_empty());
        assert!(engine.control(inner).unwrap().is_disposed());
        assert!(engine.surface().children(outer_main).is_empty());
        assert!(engine.surface().listeners(outer_main).is_empty());
        assert_eq!(engine.widget_for_node(outer_main), None);
        assert!(engine.get("outer").is_none());
    }

    #[test]
    fn dispose_is_idempotent() {
        let mut engine = Engine::new();
        let (outer, _) = tree(&mut engine);
        engine.lifecycle_events();

        engine.dispose(outer).unwrap();
        let first = engine.lifecycle_events();
        engine.dispose(outer).unwrap();
        assert!(engine.lifecycle_events().is_empty());

        let disposed = first
            .iter()
            .filter(|e| matches!(e, LifecycleEvent::Disposed { .. }))
            .count();
        assert_eq!(disposed, 2);
        assert_eq!(engine.lifecycle().live_count(), 0);
    }

    #[test]
    fn release_frees_slots() {
        let mut engine = Engine::new();
        let (outer, inner) = tree(&mut engine);
        let loose = engine
            .create("Panel", &Options::from_iter([("id".into(), json!("x"))]), None, None)
            .unwrap()
            .unwrap();

        engine.release(outer).unwrap();
        assert!(!engine.contains(outer));
        assert!(!engine.contains(inner));
        assert!(engine.contains(loose));
        assert!(matches!(
            engine.release(outer),
            Err(EngineError::UnknownWidget(_))
        ));
    }

    #[test]
    fn release_after_dispose_frees_former_children() {
        let mut engine = Engine::new();
        let (outer, inner) = tree(&mut engine);
        let leaf = engine
            .create("Panel", &Options::from_iter([("id".into(), json!("leaf"))]), None, None)
            .unwrap()
            .unwrap();
        engine.append_control(inner, leaf).unwrap();

        engine.dispose(outer).unwrap();
        assert!(engine.control(outer).unwrap().control_map().is_empty());

        engine.release(outer).unwrap();
        assert!(!engine.contains(outer));
        assert!(!engine.contains(inner));
        assert!(!engine.contains(leaf));
        assert!(engine.is_empty());
    }

    #[test]
    fn remove_scope_releases_members() {
        let mut engine = Engine::new();
        let action = engine.create_scope("a");
        let key = engine
            .create("Panel", &Options::new(), None, Some(action))
            .unwrap()
            .unwrap();
        engine.remove_scope(action).unwrap();
        assert!(!engine.contains(key));
        assert!(engine.scope(action).is_none());
        assert!(matches!(
            engine.remove_scope(engine.default_scope()),
            Err(EngineError::DefaultScope)
        ));
    }
}

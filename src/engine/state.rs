//! State flags, disabled/readonly propagation and visibility.

use super::Engine;
use crate::error::EngineError;
use crate::widget::{WidgetKey, WidgetState};

impl Engine {
    /// Set a state flag and its modifier class. Idempotent.
    pub fn set_state(
        &mut self,
        key: WidgetKey,
        state: impl Into<WidgetState>,
    ) -> Result<(), EngineError> {
        let slot = self
            .widgets
            .get_mut(key)
            .ok_or(EngineError::UnknownWidget(key))?;
        slot.control.set_state(&mut self.surface, state);
        Ok(())
    }

    /// Clear a state flag and its modifier class. Idempotent.
    pub fn remove_state(
        &mut self,
        key: WidgetKey,
        state: impl Into<WidgetState>,
    ) -> Result<(), EngineError> {
        let slot = self
            .widgets
            .get_mut(key)
            .ok_or(EngineError::UnknownWidget(key))?;
        slot.control.remove_state(&mut self.surface, state);
        Ok(())
    }

    /// Whether a state flag is present. `false` for unknown widgets.
    pub fn get_state(&self, key: WidgetKey, state: impl Into<WidgetState>) -> bool {
        self.control(key).is_some_and(|c| c.get_state(state))
    }

    /// Set or clear `disabled`, then let the widget mirror it.
    pub fn disable(&mut self, key: WidgetKey, disabled: bool) -> Result<(), EngineError> {
        self.with_cx(key, |widget, cx| {
            cx.control.disable(cx.surface, disabled);
            widget.on_disable(cx, disabled);
        })
        .ok_or(EngineError::UnknownWidget(key))
    }

    /// Clear `disabled`.
    pub fn enable(&mut self, key: WidgetKey) -> Result<(), EngineError> {
        self.disable(key, false)
    }

    /// Alias of [`disable`](Self::disable).
    pub fn set_disabled(&mut self, key: WidgetKey, disabled: bool) -> Result<(), EngineError> {
        self.disable(key, disabled)
    }

    /// Set or clear `readonly`, then let the widget mirror it.
    pub fn readonly(&mut self, key: WidgetKey, readonly: bool) -> Result<(), EngineError> {
        self.with_cx(key, |widget, cx| {
            cx.control.readonly(cx.surface, readonly);
            widget.on_readonly(cx, readonly);
        })
        .ok_or(EngineError::UnknownWidget(key))
    }

    /// Clear `readonly`.
    pub fn editable(&mut self, key: WidgetKey) -> Result<(), EngineError> {
        self.readonly(key, false)
    }

    /// Alias of [`readonly`](Self::readonly).
    pub fn set_readonly(&mut self, key: WidgetKey, readonly: bool) -> Result<(), EngineError> {
        self.readonly(key, readonly)
    }

    pub fn is_disabled(&self, key: WidgetKey) -> bool {
        self.control(key).is_some_and(|c| c.is_disabled())
    }

    pub fn is_readonly(&self, key: WidgetKey) -> bool {
        self.control(key).is_some_and(|c| c.is_readonly())
    }

    /// Make the widget's surface node visible.
    pub fn show(&mut self, key: WidgetKey) -> Result<(), EngineError> {
        self.set_visible(key, true)
    }

    /// Hide the widget's surface node.
    pub fn hide(&mut self, key: WidgetKey) -> Result<(), EngineError> {
        self.set_visible(key, false)
    }

    /// Whether the widget's surface node is visible. `false` without a node.
    pub fn is_visible(&self, key: WidgetKey) -> bool {
        self.control(key)
            .and_then(|c| c.main())
            .and_then(|main| self.surface.get(main))
            .is_some_and(|node| node.visible)
    }

    fn set_visible(&mut self, key: WidgetKey, visible: bool) -> Result<(), EngineError> {
        let main = self
            .control(key)
            .ok_or(EngineError::UnknownWidget(key))?
            .main();
        if let Some(node) = main.and_then(|main| self.surface.get_mut(main)) {
            node.visible = visible;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;

    fn panel(engine: &mut Engine) -> WidgetKey {
        engine
            .create("Panel", &Options::new(), None, None)
            .unwrap()
            .unwrap()
    }

    fn classes(engine: &Engine, key: WidgetKey) -> String {
        let main = engine.control(key).unwrap().main().unwrap();
        engine.surface().get(main).unwrap().class_name().to_owned()
    }

    #[test]
    fn set_state_is_idempotent() {
        let mut engine = Engine::new();
        let key = panel(&mut engine);
        engine.set_state(key, "x").unwrap();
        engine.set_state(key, "x").unwrap();
        assert!(engine.get_state(key, "x"));
        assert_eq!(classes(&engine, key), "ui-panel ui-panel-x");

        engine.remove_state(key, "x").unwrap();
        assert!(!engine.get_state(key, "x"));
        assert_eq!(classes(&engine, key), "ui-panel");
    }

    #[test]
    fn enable_and_editable_clear_flags() {
        let mut engine = Engine::new();
        let key = panel(&mut engine);

        engine.disable(key, true).unwrap();
        assert!(engine.is_disabled(key));
        assert!(classes(&engine, key).contains("ui-panel-disabled"));
        engine.enable(key).unwrap();
        assert!(!engine.is_disabled(key));
        assert!(!classes(&engine, key).contains("disabled"));

        engine.set_readonly(key, true).unwrap();
        assert!(engine.is_readonly(key));
        engine.editable(key).unwrap();
        assert!(!engine.is_readonly(key));
    }

    #[test]
    fn show_and_hide() {
        let mut engine = Engine::new();
        let key = panel(&mut engine);
        assert!(engine.is_visible(key));
        engine.hide(key).unwrap();
        assert!(!engine.is_visible(key));
        engine.show(key).unwrap();
        assert!(engine.is_visible(key));
    }
}

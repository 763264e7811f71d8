//! Form helpers: validation, parameter collection and value access.

use serde_json::Value;

use super::Engine;
use crate::error::EngineError;
use crate::options::{self, Options};
use crate::widget::WidgetKey;

impl Engine {
    /// Whether the widget carries the form capability.
    pub fn is_form(&self, key: WidgetKey) -> bool {
        self.widgets
            .get(key)
            .is_some_and(|slot| slot.widget.form().is_some())
    }

    /// The name under which a form widget reports its value.
    pub fn form_name(&self, key: WidgetKey) -> Option<String> {
        let slot = self.widgets.get(key)?;
        slot.widget.form()?.form_name(&slot.control, &self.surface)
    }

    /// A form widget's current value.
    pub fn value(&self, key: WidgetKey) -> Option<Value> {
        let slot = self.widgets.get(key)?;
        Some(slot.widget.form()?.value(&slot.control, &self.surface))
    }

    /// Replace a form widget's value. Returns `false` when the widget has no
    /// form capability.
    pub fn set_value(&mut self, key: WidgetKey, value: Value) -> Result<bool, EngineError> {
        self.with_cx(key, |widget, cx| match widget.form_mut() {
            Some(form) => {
                form.set_value(cx, value);
                true
            }
            None => false,
        })
        .ok_or(EngineError::UnknownWidget(key))
    }

    /// Validate a widget and its rule-bearing or composite descendants.
    ///
    /// A disabled widget is valid together with its whole subtree. Otherwise
    /// the widget's own rules are applied in order until one fails; when all
    /// pass, every qualifying child is validated (no short-circuit) and the
    /// results are combined.
    pub fn validate(&self, key: WidgetKey) -> bool {
        let Some(slot) = self.widgets.get(key) else {
            return true;
        };
        let control = &slot.control;
        if control.is_disabled() {
            return true;
        }

        let value = slot
            .widget
            .form()
            .map(|form| form.value(control, &self.surface));
        let mut valid = control
            .rules()
            .iter()
            .all(|rule| self.rules.apply_rule(control, value.as_ref(), rule));
        if !valid {
            return false;
        }

        for child in control.children() {
            let Some(child_control) = self.control(child) else {
                continue;
            };
            if child_control.has_rules() || !child_control.control_map().is_empty() {
                valid = self.validate(child) && valid;
            }
        }
        valid
    }

    /// Collect `form name -> value` for every form widget at or below `key`
    /// into `acc`. Recursion stops at form widgets.
    pub fn get_param_map(&self, key: WidgetKey, acc: Option<Options>) -> Options {
        let mut acc = acc.unwrap_or_default();
        self.collect_params(key, &mut acc);
        acc
    }

    /// `name=value` pairs joined by `&` for every named, truthy entry of the
    /// param map. Values are not escaped.
    pub fn get_param_string(&self, key: WidgetKey) -> String {
        self.get_param_map(key, None)
            .iter()
            .filter(|(name, value)| !name.is_empty() && options::truthy(value))
            .filter_map(|(name, value)| {
                options::value_to_string(value).map(|value| format!("{name}={value}"))
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    fn collect_params(&self, key: WidgetKey, acc: &mut Options) {
        let Some(slot) = self.widgets.get(key) else {
            return;
        };
        if let Some(form) = slot.widget.form() {
            if let Some(name) = form.form_name(&slot.control, &self.surface) {
                acc.insert(name, form.value(&slot.control, &self.surface));
            }
            return;
        }
        for child in slot.control.children() {
            self.collect_params(child, acc);
        }
    }
}

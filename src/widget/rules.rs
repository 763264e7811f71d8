//! Validation rule evaluation collaborator.

use serde_json::Value;

use super::control::Control;

/// Evaluates one configured rule against a widget.
pub trait RuleEvaluator {
    /// Whether `rule` passes for `control` holding `value` (`None` for
    /// widgets without a form capability).
    fn apply_rule(&self, control: &Control, value: Option<&Value>, rule: &Value) -> bool;
}

/// Passes every rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl RuleEvaluator for AcceptAll {
    fn apply_rule(&self, _control: &Control, _value: Option<&Value>, _rule: &Value) -> bool {
        true
    }
}

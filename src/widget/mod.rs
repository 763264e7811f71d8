//! Widget contract: base record, states, capability traits, lifecycle.

pub mod control;
pub mod lifecycle;
pub mod rules;
pub mod state;
pub mod traits;

pub use control::{Control, Owner, WidgetKey};
pub use lifecycle::{LifecycleEvent, LifecycleTracker};
pub use rules::{AcceptAll, RuleEvaluator};
pub use state::{StateSet, WidgetState};
pub use traits::{FormControl, Widget, WidgetCx};

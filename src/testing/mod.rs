//! Headless testing helpers: Pilot, snapshot dumps.
//!
//! Use the [`Pilot`] to drive an [`Engine`](crate::engine::Engine) with
//! simulated surface notifications. Use [`surface_to_string`] and
//! [`widget_tree_to_string`] to capture trees as plain text for snapshot
//! assertions.

pub mod pilot;
pub mod snapshot;

pub use pilot::Pilot;
pub use snapshot::{surface_to_string, widget_tree_to_string};

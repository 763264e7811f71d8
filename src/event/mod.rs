//! Events: surface notifications, widget messages, deferred tasks.

pub mod handler;
pub mod input;
pub mod message;

pub use handler::{bubble_path, DeferredQueue, DeferredTask, EventQueue};
pub use input::{EventKind, Key, ListenerSet, SurfaceEvent};
pub use message::{Message, MessageKind};

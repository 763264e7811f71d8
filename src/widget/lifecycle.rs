//! Widget lifecycle: create, attach, render, dispose.
//!
//! The `LifecycleTracker` records which widgets are currently live in the
//! engine and accumulates lifecycle events that the application can drain.

use std::collections::HashSet;

use super::control::{Owner, WidgetKey};

// ---------------------------------------------------------------------------
// LifecycleEvent
// ---------------------------------------------------------------------------

/// Events that occur during the widget lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// A widget was constructed and registered.
    Created { key: WidgetKey },
    /// A widget was attached under a new owner.
    Attached { key: WidgetKey, owner: Owner },
    /// A widget finished rendering.
    Rendered { key: WidgetKey },
    /// A widget was disposed.
    Disposed { key: WidgetKey },
}

// ---------------------------------------------------------------------------
// LifecycleTracker
// ---------------------------------------------------------------------------

/// Tracks which widgets are live and accumulates lifecycle events.
#[derive(Debug, Default)]
pub struct LifecycleTracker {
    live: HashSet<WidgetKey>,
    pending: Vec<LifecycleEvent>,
}

impl LifecycleTracker {
    /// Create a new, empty lifecycle tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that a widget was created.
    ///
    /// If the widget is already live, this is a no-op.
    pub fn on_create(&mut self, key: WidgetKey) {
        if self.live.insert(key) {
            self.pending.push(LifecycleEvent::Created { key });
        }
    }

    /// Record that a live widget was attached under `owner`.
    pub fn on_attach(&mut self, key: WidgetKey, owner: Owner) {
        if self.live.contains(&key) {
            self.pending.push(LifecycleEvent::Attached { key, owner });
        }
    }

    /// Record that a live widget rendered.
    pub fn on_render(&mut self, key: WidgetKey) {
        if self.live.contains(&key) {
            self.pending.push(LifecycleEvent::Rendered { key });
        }
    }

    /// Record that a widget was disposed.
    ///
    /// If the widget was not live, this is a no-op (no spurious event).
    pub fn on_dispose(&mut self, key: WidgetKey) {
        if self.live.remove(&key) {
            self.pending.push(LifecycleEvent::Disposed { key });
        }
    }

    /// Check whether a widget is live.
    pub fn is_live(&self, key: WidgetKey) -> bool {
        self.live.contains(&key)
    }

    /// The number of live widgets.
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Drain and return all pending lifecycle events.
    pub fn pending_events(&mut self) -> Vec<LifecycleEvent> {
        std::mem::take(&mut self.pending)
    }

    /// Whether there are any pending events.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Clear all state (live widgets and pending events).
    pub fn clear(&mut self) {
        self.live.clear();
        self.pending.clear();
    }
}

// ===========================================================================
// Tests
// ===========================================================================

//! Event queues: widget messages, deferred tasks, and bubble path computation.
//!
//! [`EventQueue`] collects [`Message`]s emitted by widgets while handling
//! surface notifications. [`DeferredQueue`] holds side effects that must run
//! after the current event turn. Neither routes anything on its own; the
//! embedding application drains them.

use std::collections::VecDeque;

use super::message::Message;
use crate::surface::{NodeId, Surface};

// ---------------------------------------------------------------------------
// EventQueue
// ---------------------------------------------------------------------------

/// Queue of widget messages awaiting the application.
#[derive(Debug, Default)]
pub struct EventQueue {
    queue: VecDeque<Message>,
}

impl EventQueue {
    /// Create a new, empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a message.
    pub fn push(&mut self, message: Message) {
        self.queue.push_back(message);
    }

    /// Drain all pending messages and return them as a `Vec`.
    pub fn drain(&mut self) -> Vec<Message> {
        self.queue.drain(..).collect()
    }

    /// Number of pending messages.
    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Drop every pending message.
    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

// ---------------------------------------------------------------------------
// DeferredQueue
// ---------------------------------------------------------------------------

/// A side effect scheduled to run after the current event turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredTask {
    /// Select the text of a node.
    Select(NodeId),
}

/// Tasks deferred until the host calls `Engine::run_deferred`.
#[derive(Debug, Default)]
pub struct DeferredQueue {
    tasks: VecDeque<DeferredTask>,
}

impl DeferredQueue {
    /// Create a new, empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a task.
    pub fn push(&mut self, task: DeferredTask) {
        self.tasks.push_back(task);
    }

    /// Take every scheduled task.
    pub fn drain(&mut self) -> Vec<DeferredTask> {
        self.tasks.drain(..).collect()
    }

    /// Number of scheduled tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether nothing is scheduled.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Drop every scheduled task.
    pub fn clear(&mut self) {
        self.tasks.clear();
    }
}

// ---------------------------------------------------------------------------
// Bubble path
// ---------------------------------------------------------------------------

/// Compute the bubble path from `start` upward (inclusive).
///
/// Returns `[start, parent, grandparent, ...]`, at most `max_depth + 1`
/// entries. If `start` does not exist, returns an empty vec.
pub fn bubble_path(surface: &Surface, start: NodeId, max_depth: usize) -> Vec<NodeId> {
    if !surface.contains(start) {
        return Vec::new();
    }
    let mut path = vec![start];
    let mut current = start;
    while let Some(parent) = surface.parent(current) {
        if path.len() > max_depth {
            tracing::warn!(?start, max_depth, "bubble path truncated");
            break;
        }
        path.push(parent);
        current = parent;
    }
    path
}

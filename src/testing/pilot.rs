//! Pilot: programmatic interaction with a headless engine.
//!
//! The `Pilot` wraps an [`Engine`] and simulates user interaction on surface
//! nodes (pointer, focus, keys). Deferred side effects run after every
//! simulated interaction, the way a host would flush them after an event turn.

use crate::config::EngineConfig;
use crate::engine::Engine;
use crate::error::EngineError;
use crate::event::{Key, Message, SurfaceEvent};
use crate::surface::{NodeData, NodeId};

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless engine driver for testing.
///
/// # Examples
///
/// ```ignore
/// use ctrlkit::testing::Pilot;
///
/// let mut pilot = Pilot::new();
/// let node = pilot
///     .mount(NodeData::new("input").with_attr("ui", "type:TextInput;id:q"))
///     .unwrap();
/// pilot.focus(node);
/// assert_eq!(pilot.messages().len(), 1);
/// ```
pub struct Pilot {
    engine: Engine,
}

impl Pilot {
    /// A pilot over a fresh engine with the default config.
    pub fn new() -> Self {
        Self {
            engine: Engine::new(),
        }
    }

    /// A pilot over a fresh engine with the given config.
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            engine: Engine::with_config(config),
        }
    }

    /// A pilot over an existing engine.
    pub fn with_engine(engine: Engine) -> Self {
        Self { engine }
    }

    // ── Setup ────────────────────────────────────────────────────────

    /// Append `node` under a fresh host `div` below the surface root and
    /// initialize widgets in the host's subtree into the default scope.
    /// Returns the new node.
    pub fn mount(&mut self, node: NodeData) -> Result<NodeId, EngineError> {
        let root = self.engine.surface().root();
        let surface = self.engine.surface_mut();
        let host = surface.insert_child(root, NodeData::new("div"))?;
        let id = surface.insert_child(host, node)?;
        self.engine.init(Some(host), None, None)?;
        Ok(id)
    }

    /// Append `node` under `parent` without initializing anything.
    pub fn insert(&mut self, parent: NodeId, node: NodeData) -> Result<NodeId, EngineError> {
        Ok(self.engine.surface_mut().insert_child(parent, node)?)
    }

    /// The node carrying `id`.
    pub fn node(&self, id: &str) -> Option<NodeId> {
        self.engine.surface().query_by_id(id)
    }

    // ── Input simulation ─────────────────────────────────────────────

    /// Pointer enters `node`.
    pub fn hover(&mut self, node: NodeId) -> usize {
        self.send(node, SurfaceEvent::PointerEnter)
    }

    /// Pointer leaves `node`.
    pub fn leave(&mut self, node: NodeId) -> usize {
        self.send(node, SurfaceEvent::PointerLeave)
    }

    /// Pointer button goes down on `node`.
    pub fn press(&mut self, node: NodeId) -> usize {
        self.send(node, SurfaceEvent::PointerDown)
    }

    /// Pointer button goes up on `node`.
    pub fn release(&mut self, node: NodeId) -> usize {
        self.send(node, SurfaceEvent::PointerUp)
    }

    /// Press then release on `node`.
    pub fn click(&mut self, node: NodeId) {
        self.press(node);
        self.release(node);
    }

    pub fn focus(&mut self, node: NodeId) -> usize {
        self.send(node, SurfaceEvent::Focus)
    }

    pub fn blur(&mut self, node: NodeId) -> usize {
        self.send(node, SurfaceEvent::Blur)
    }

    /// A key press on `node`.
    pub fn press_key(&mut self, node: NodeId, key: Key) -> usize {
        self.send(node, SurfaceEvent::KeyPress(key))
    }

    /// Each character of `text` as an individual key press on `node`.
    pub fn type_text(&mut self, node: NodeId, text: &str) {
        for ch in text.chars() {
            self.press_key(node, Key::Char(ch));
        }
    }

    // ── Query ────────────────────────────────────────────────────────

    /// Drain the messages widgets emitted so far.
    pub fn messages(&mut self) -> Vec<Message> {
        self.engine.drain_messages()
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }

    pub fn into_engine(self) -> Engine {
        self.engine
    }

    fn send(&mut self, node: NodeId, event: SurfaceEvent) -> usize {
        let handled = self.engine.dispatch(node, event);
        self.engine.run_deferred();
        handled
    }
}

impl Default for Pilot {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::MessageKind;
    use crate::widget::WidgetState;

    fn button(pilot: &mut Pilot) -> NodeId {
        pilot
            .mount(NodeData::new("div").with_attr("ui", "type:Panel;id:btn;autoState:yes"))
            .unwrap()
    }

    #[test]
    fn mount_initializes_widgets() {
        let mut pilot = Pilot::new();
        let node = button(&mut pilot);
        assert_eq!(pilot.node("btn"), Some(node));
        assert!(pilot.engine().get("btn").is_some());

        pilot
            .mount(NodeData::new("div").with_attr("ui", "type:Panel;id:second"))
            .unwrap();
        assert_eq!(pilot.engine().len(), 2);
    }

    #[test]
    fn click_leaves_hover_only() {
        let mut pilot = Pilot::new();
        let node = button(&mut pilot);
        let key = pilot.engine().get("btn").unwrap();

        assert_eq!(pilot.hover(node), 1);
        pilot.click(node);
        assert!(pilot.engine().get_state(key, WidgetState::Hover));
        assert!(!pilot.engine().get_state(key, WidgetState::Press));

        pilot.press(node);
        pilot.leave(node);
        assert!(pilot.engine().control(key).unwrap().states().is_empty());
    }

    #[test]
    fn focus_selects_through_deferred_queue() {
        let mut pilot = Pilot::new();
        let node = pilot
            .mount(
                NodeData::new("input")
                    .with_attr("type", "text")
                    .with_attr("ui", "type:TextInput;id:q;autoSelect:1"),
            )
            .unwrap();

        assert_eq!(pilot.focus(node), 1);
        assert_eq!(pilot.engine().surface().selection(), Some(node));
        pilot.type_text(node, "ab");
        pilot.press_key(node, Key::Enter);
        let kinds: Vec<MessageKind> = pilot.messages().into_iter().map(|m| m.kind).collect();
        assert_eq!(kinds, [MessageKind::Focus, MessageKind::Submit]);
    }

    #[test]
    fn insert_does_not_init() {
        let mut pilot = Pilot::new();
        let root = pilot.engine().surface().root();
        pilot
            .insert(root, NodeData::new("div").with_attr("ui", "type:Panel;id:later"))
            .unwrap();
        assert!(pilot.engine().get("later").is_none());
        let engine = pilot.into_engine();
        assert!(engine.is_empty());
    }
}

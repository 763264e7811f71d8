//! Tree operations: insert, append, remove, clear, walk, listeners.

use std::collections::VecDeque;

use slotmap::{SecondaryMap, SlotMap};

use super::node::{NodeData, NodeId};
use crate::error::SurfaceError;
use crate::event::input::ListenerSet;

/// Empty slice constant for returning when a node has no children.
const EMPTY_CHILDREN: &[NodeId] = &[];

/// A headless rendering surface, backed by a slotmap arena.
///
/// The surface always has a document root (`body`). Nodes created with
/// [`create_element`](Surface::create_element) start detached and join the
/// tree through [`append_child`](Surface::append_child).
pub struct Surface {
    nodes: SlotMap<NodeId, NodeData>,
    children: SecondaryMap<NodeId, Vec<NodeId>>,
    parent: SecondaryMap<NodeId, NodeId>,
    listeners: SecondaryMap<NodeId, ListenerSet>,
    root: NodeId,
}

impl Surface {
    /// Create a surface containing only the document root.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(NodeData::new("body"));
        let mut children = SecondaryMap::new();
        children.insert(root, Vec::new());
        Self {
            nodes,
            children,
            parent: SecondaryMap::new(),
            listeners: SecondaryMap::new(),
            root,
        }
    }

    /// The document root.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Create a detached node.
    pub fn create_element(&mut self, data: NodeData) -> NodeId {
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        id
    }

    /// Create a node as the last child of `parent`.
    pub fn insert_child(&mut self, parent: NodeId, data: NodeData) -> Result<NodeId, SurfaceError> {
        if !self.nodes.contains_key(parent) {
            return Err(SurfaceError::UnknownNode(parent));
        }
        let id = self.create_element(data);
        self.parent.insert(id, parent);
        if let Some(kids) = self.children.get_mut(parent) {
            kids.push(id);
        }
        Ok(id)
    }

    /// Move `node` (with its subtree) to become the last child of `parent`.
    ///
    /// Fails if either node is unknown or if `node` is `parent` or one of its
    /// ancestors.
    pub fn append_child(&mut self, parent: NodeId, node: NodeId) -> Result<(), SurfaceError> {
        if !self.nodes.contains_key(parent) {
            return Err(SurfaceError::UnknownNode(parent));
        }
        if !self.nodes.contains_key(node) {
            return Err(SurfaceError::UnknownNode(node));
        }
        if node == parent || self.ancestors(parent).contains(&node) {
            return Err(SurfaceError::Cycle { parent, child: node });
        }
        self.detach(node);
        self.parent.insert(node, parent);
        if let Some(kids) = self.children.get_mut(parent) {
            kids.push(node);
        }
        Ok(())
    }

    /// Detach `node` from its parent, keeping it (and its subtree) alive.
    pub fn detach(&mut self, node: NodeId) {
        if let Some(old_parent) = self.parent.remove(node) {
            if let Some(siblings) = self.children.get_mut(old_parent) {
                siblings.retain(|&child| child != node);
            }
        }
    }

    /// Remove a node and all its descendants.
    ///
    /// Returns the `NodeData` for the removed node, or `None` if it didn't
    /// exist. The document root cannot be removed.
    pub fn remove(&mut self, id: NodeId) -> Option<NodeData> {
        if id == self.root || !self.nodes.contains_key(id) {
            return None;
        }
        self.detach(id);

        let mut to_remove = VecDeque::new();
        to_remove.push_back(id);
        let mut removed_data = None;

        while let Some(current) = to_remove.pop_front() {
            if let Some(kids) = self.children.remove(current) {
                to_remove.extend(kids);
            }
            self.parent.remove(current);
            self.listeners.remove(current);
            let data = self.nodes.remove(current);
            if current == id {
                removed_data = data;
            }
        }

        removed_data
    }

    /// Clear a node's content: remove every descendant and its text.
    pub fn clear_content(&mut self, id: NodeId) {
        let kids: Vec<NodeId> = self.children(id).to_vec();
        for kid in kids {
            self.remove(kid);
        }
        if let Some(data) = self.nodes.get_mut(id) {
            data.text.clear();
        }
    }

    /// Get the parent of a node, if it has one.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parent.get(id).copied()
    }

    /// Get the children of a node. Returns an empty slice if the node has no
    /// children or does not exist.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Walk from `id` up to the top, collecting ancestor node ids.
    ///
    /// The returned vec does **not** include `id` itself.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(p) = self.parent.get(current).copied() {
            result.push(p);
            current = p;
        }
        result
    }

    /// Whether `id` is attached below the document root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        id == self.root || self.ancestors(id).last() == Some(&self.root)
    }

    /// Immutable access to a node's data.
    pub fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id)
    }

    /// Mutable access to a node's data.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(id)
    }

    /// Number of nodes, including the document root and detached nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether only the document root exists.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Whether the surface contains a node with the given id.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Pre-order depth-first traversal starting from `start`.
    pub fn walk_depth_first(&self, start: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            // Push children in reverse so the first child is visited first.
            for &child in self.children(current).iter().rev() {
                stack.push(child);
            }
        }
        result
    }

    /// All descendants of `root` in document order, excluding `root` itself.
    pub fn find_all_nodes(&self, root: NodeId) -> Vec<NodeId> {
        let mut nodes = self.walk_depth_first(root);
        if !nodes.is_empty() {
            nodes.remove(0);
        }
        nodes
    }

    /// First node in the tree whose id matches.
    pub fn query_by_id(&self, id: &str) -> Option<NodeId> {
        self.walk_depth_first(self.root)
            .into_iter()
            .find(|&node| self.nodes[node].id.as_deref() == Some(id))
    }

    // -----------------------------------------------------------------------
    // Listeners
    // -----------------------------------------------------------------------

    /// Register listeners for the given event kinds on a node.
    pub fn listen(&mut self, id: NodeId, kinds: ListenerSet) {
        if !self.nodes.contains_key(id) {
            return;
        }
        let current = self.listeners.get(id).copied().unwrap_or_default();
        self.listeners.insert(id, current | kinds);
    }

    /// Unregister listeners for the given event kinds on a node.
    pub fn unlisten(&mut self, id: NodeId, kinds: ListenerSet) {
        if let Some(current) = self.listeners.get_mut(id) {
            *current = current.without(kinds);
        }
    }

    /// Unregister every listener on a node.
    pub fn clear_listeners(&mut self, id: NodeId) {
        self.listeners.remove(id);
    }

    /// The listeners registered on a node.
    pub fn listeners(&self, id: NodeId) -> ListenerSet {
        self.listeners.get(id).copied().unwrap_or_default()
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    /// Select the text of a node, clearing every other selection.
    pub fn select(&mut self, id: NodeId) {
        if !self.nodes.contains_key(id) {
            return;
        }
        for (_, data) in self.nodes.iter_mut() {
            data.selected = false;
        }
        self.nodes[id].selected = true;
    }

    /// The node whose text is selected, if any.
    pub fn selection(&self) -> Option<NodeId> {
        self.nodes
            .iter()
            .find(|(_, data)| data.selected)
            .map(|(id, _)| id)
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::new()
    }
}

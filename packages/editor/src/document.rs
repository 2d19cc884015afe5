//! # Document Tree Store
//!
//! Owns the ordered forest of content nodes and the selection state.
//!
//! Nodes live in an arena keyed by id. Each node lists its child ids in
//! order; a parent index maps every non-root node to its parent, and the
//! root sequence holds top-level ids. Lookups are O(1) and no operation has
//! to rebuild nested structures.
//!
//! ## Lifecycle
//!
//! ```text
//! new → add / update / move / remove → snapshot → export
//! ```
//!
//! Every operation validates before it touches the arena, so a failed call
//! leaves the document exactly as it was.

use crate::mutations::{Mutation, MutationEffect, MutationError, MutationResult, NodePatch, Position};
use crate::selection::Selection;
use crate::EditorError;
use pagecraft_model::defaults::{column_cells, default_content, default_props, default_styles};
use pagecraft_model::{IDGenerator, Node, NodeId, NodeKind, NodeSnapshot};
use std::collections::HashMap;
use tracing::debug;

/// Editable document tree
#[derive(Debug, Clone)]
pub struct Document {
    /// Number of mutations applied through [`Document::apply`]
    pub version: u64,

    nodes: HashMap<NodeId, Node>,
    parents: HashMap<NodeId, NodeId>,
    roots: Vec<NodeId>,
    selection: Selection,
    ids: IDGenerator,
}

impl Document {
    /// Empty document with randomly seeded ids
    pub fn new() -> Self {
        Self::with_id_generator(IDGenerator::random())
    }

    /// Empty document drawing ids from `ids`
    pub fn with_id_generator(ids: IDGenerator) -> Self {
        Self {
            version: 0,
            nodes: HashMap::new(),
            parents: HashMap::new(),
            roots: Vec::new(),
            selection: Selection::new(),
            ids,
        }
    }

    /// Apply a mutation and bump the version
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, EditorError> {
        let effect = mutation.apply(self)?;
        if effect != MutationEffect::Unchanged {
            self.version += 1;
        }

        Ok(MutationResult {
            version: self.version,
            effect,
        })
    }

    // ---------------------------------------------------------------------
    // Mutation API
    // ---------------------------------------------------------------------

    /// Create a node of `kind` under `parent_id` (or at the root) at `index`
    /// (clamped; appended when absent). Returns the new node's id.
    pub fn add_node(
        &mut self,
        kind: NodeKind,
        parent_id: Option<&str>,
        index: Option<usize>,
    ) -> Result<NodeId, MutationError> {
        if let Some(parent_id) = parent_id {
            if !self.contains(parent_id) {
                return Err(MutationError::ParentNotFound(parent_id.to_string()));
            }
        }

        let id = self.create_node(kind);
        self.insert_at(parent_id, index, id.clone());

        debug!(node_id = %id, %kind, parent_id = ?parent_id, index = ?index, "Added node");
        Ok(id)
    }

    /// Shallow-merge `patch` into the node
    pub fn update_node(&mut self, node_id: &str, patch: NodePatch) -> Result<(), MutationError> {
        let node = self
            .nodes
            .get_mut(node_id)
            .ok_or_else(|| MutationError::NodeNotFound(node_id.to_string()))?;

        if let Some(content) = patch.content {
            node.content = content;
        }
        if let Some(styles) = patch.styles {
            node.styles = styles;
        }
        if let Some(props) = patch.props {
            node.props = props;
        }

        debug!(node_id, "Updated node");
        Ok(())
    }

    /// Set one style property, keeping the others
    pub fn update_node_style(
        &mut self,
        node_id: &str,
        property: &str,
        value: &str,
    ) -> Result<(), MutationError> {
        let node = self
            .nodes
            .get_mut(node_id)
            .ok_or_else(|| MutationError::NodeNotFound(node_id.to_string()))?;

        node.styles.insert(property.to_string(), value.to_string());

        debug!(node_id, property, value, "Set style property");
        Ok(())
    }

    /// Remove a node and its whole subtree. Returns the removed ids in
    /// pre-order and clears the selection if it pointed into the subtree.
    pub fn remove_node(&mut self, node_id: &str) -> Result<Vec<NodeId>, MutationError> {
        if !self.contains(node_id) {
            return Err(MutationError::NodeNotFound(node_id.to_string()));
        }

        let removed = self.subtree_ids(node_id);
        self.detach(node_id);

        for id in &removed {
            self.nodes.remove(id);
            self.parents.remove(id);
        }

        let cleared = self.selection.clear_if_removed(&removed);
        debug!(node_id, removed = removed.len(), cleared_selection = cleared, "Removed node");
        Ok(removed)
    }

    /// Move `node_id` before/after `target_id`, or append it inside.
    ///
    /// Returns `Ok(false)` when the move leaves the tree as it is (moving a
    /// node before or after itself).
    pub fn move_node(
        &mut self,
        node_id: &str,
        target_id: &str,
        position: Position,
    ) -> Result<bool, MutationError> {
        if !self.check_move(node_id, target_id, position)? {
            return Ok(false);
        }

        self.detach(node_id)
            .ok_or_else(|| MutationError::NodeNotFound(node_id.to_string()))?;

        // Target index is read after the detach so same-list moves land right
        let (parent, index) = match position {
            Position::Inside => (Some(target_id.to_string()), None),
            Position::Before | Position::After => {
                let parent = self.parents.get(target_id).cloned();
                let target_index = self
                    .sequence(parent.as_deref())
                    .iter()
                    .position(|id| id == target_id)
                    .unwrap_or(0);
                let offset = if position == Position::After { 1 } else { 0 };
                (parent, Some(target_index + offset))
            }
        };

        self.insert_at(parent.as_deref(), index, node_id.to_string());

        debug!(node_id, target_id, %position, "Moved node");
        Ok(true)
    }

    /// Check a move without applying it.
    ///
    /// `Ok(true)` means the move changes the tree, `Ok(false)` means it is a
    /// no-op. Moving a node inside itself or relative to any of its
    /// descendants is rejected.
    pub fn check_move(
        &self,
        node_id: &str,
        target_id: &str,
        position: Position,
    ) -> Result<bool, MutationError> {
        if !self.contains(node_id) {
            return Err(MutationError::NodeNotFound(node_id.to_string()));
        }
        if !self.contains(target_id) {
            return Err(MutationError::TargetNotFound(target_id.to_string()));
        }

        let cycle = || MutationError::CycleDetected {
            node_id: node_id.to_string(),
            target_id: target_id.to_string(),
        };

        if node_id == target_id {
            return match position {
                Position::Inside => Err(cycle()),
                Position::Before | Position::After => Ok(false),
            };
        }
        if self.is_descendant(target_id, node_id) {
            return Err(cycle());
        }

        Ok(true)
    }

    /// Replace the selection. Unknown ids are rejected.
    pub fn select_node(&mut self, node_id: Option<&str>) -> Result<(), MutationError> {
        match node_id {
            Some(id) if !self.contains(id) => Err(MutationError::NodeNotFound(id.to_string())),
            Some(id) => {
                self.selection.select(id.to_string());
                Ok(())
            }
            None => {
                self.selection.clear();
                Ok(())
            }
        }
    }

    pub fn set_preview_mode(&mut self, enabled: bool) {
        self.selection.set_preview_mode(enabled);
    }

    // ---------------------------------------------------------------------
    // Readers
    // ---------------------------------------------------------------------

    pub fn node(&self, node_id: &str) -> Option<&Node> {
        self.nodes.get(node_id)
    }

    pub fn contains(&self, node_id: &str) -> bool {
        self.nodes.contains_key(node_id)
    }

    /// Total number of nodes at any depth
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Child ids of a node (empty for leaves and unknown ids)
    pub fn children(&self, node_id: &str) -> &[NodeId] {
        self.nodes
            .get(node_id)
            .map(Node::child_ids)
            .unwrap_or(&[])
    }

    /// Parent id, `None` for root nodes and unknown ids
    pub fn parent(&self, node_id: &str) -> Option<&str> {
        self.parents.get(node_id).map(String::as_str)
    }

    /// Position of the node among its siblings
    pub fn index_in_parent(&self, node_id: &str) -> Option<usize> {
        if !self.contains(node_id) {
            return None;
        }
        self.sequence(self.parent(node_id))
            .iter()
            .position(|id| id == node_id)
    }

    /// Whether `node_id` lies strictly below `ancestor_id`
    pub fn is_descendant(&self, node_id: &str, ancestor_id: &str) -> bool {
        let mut current = self.parents.get(node_id);
        while let Some(parent) = current {
            if parent == ancestor_id {
                return true;
            }
            current = self.parents.get(parent);
        }
        false
    }

    /// All ids below a node, in pre-order, excluding the node itself
    pub fn descendants(&self, node_id: &str) -> Vec<NodeId> {
        let mut ids = self.subtree_ids(node_id);
        if !ids.is_empty() {
            ids.remove(0);
        }
        ids
    }

    /// Every node in document order
    pub fn walk(&self) -> Vec<&Node> {
        self.roots
            .iter()
            .flat_map(|root| self.subtree_ids(root))
            .filter_map(|id| self.nodes.get(&id))
            .collect()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selection.selected()
    }

    /// The selected node, resolved against the current tree
    pub fn selected_node(&self) -> Option<&Node> {
        self.selection.selected().and_then(|id| self.nodes.get(id))
    }

    pub fn is_preview_mode(&self) -> bool {
        self.selection.is_preview_mode()
    }

    /// Deep, owned copy of the whole tree for export
    pub fn snapshot(&self) -> Vec<NodeSnapshot> {
        self.roots
            .iter()
            .filter_map(|id| self.snapshot_node(id))
            .collect()
    }

    /// Deep copy of one subtree
    pub fn snapshot_node(&self, node_id: &str) -> Option<NodeSnapshot> {
        let node = self.nodes.get(node_id)?;
        Some(NodeSnapshot {
            id: node.id.clone(),
            kind: node.kind,
            content: node.content.clone(),
            styles: node.styles.clone(),
            props: node.props.clone(),
            children: node
                .children
                .as_ref()
                .map(|children| children.iter().filter_map(|id| self.snapshot_node(id)).collect()),
        })
    }

    // ---------------------------------------------------------------------
    // Arena plumbing
    // ---------------------------------------------------------------------

    fn create_node(&mut self, kind: NodeKind) -> NodeId {
        let id = self.ids.new_id();
        let mut node = Node {
            id: id.clone(),
            kind,
            content: default_content(kind),
            styles: default_styles(kind),
            props: default_props(kind),
            children: None,
        };

        if kind.is_container() {
            let mut cells = Vec::new();
            for (content, styles) in column_cells() {
                let cell_id = self.ids.new_id();
                self.nodes.insert(
                    cell_id.clone(),
                    Node {
                        content,
                        styles,
                        ..Node::new(cell_id.clone(), NodeKind::Paragraph)
                    },
                );
                self.parents.insert(cell_id.clone(), id.clone());
                cells.push(cell_id);
            }
            node.children = Some(cells);
        }

        self.nodes.insert(id.clone(), node);
        id
    }

    /// Sibling sequence under `parent` (the root sequence for `None`)
    fn sequence(&self, parent: Option<&str>) -> &[NodeId] {
        match parent {
            Some(parent) => self.children(parent),
            None => &self.roots,
        }
    }

    /// Insert an already-arena'd node into a sibling sequence.
    /// The parent must exist; its children sequence is created if absent.
    fn insert_at(&mut self, parent: Option<&str>, index: Option<usize>, node_id: NodeId) {
        let sequence = match parent {
            Some(parent_id) => match self.nodes.get_mut(parent_id) {
                Some(node) => node.children.get_or_insert_with(Vec::new),
                None => return,
            },
            None => &mut self.roots,
        };

        let index = index.map_or(sequence.len(), |i| i.min(sequence.len()));
        sequence.insert(index, node_id.clone());

        match parent {
            Some(parent_id) => {
                self.parents.insert(node_id, parent_id.to_string());
            }
            None => {
                self.parents.remove(&node_id);
            }
        }
    }

    /// Unlink a node from its sibling sequence, keeping it in the arena.
    /// Returns the former parent and index.
    fn detach(&mut self, node_id: &str) -> Option<(Option<NodeId>, usize)> {
        let parent = self.parents.get(node_id).cloned();
        let sequence = match &parent {
            Some(parent_id) => self.nodes.get_mut(parent_id)?.children.as_mut()?,
            None => &mut self.roots,
        };

        let index = sequence.iter().position(|id| id == node_id)?;
        sequence.remove(index);
        self.parents.remove(node_id);
        Some((parent, index))
    }

    /// The node and everything below it, in pre-order
    fn subtree_ids(&self, node_id: &str) -> Vec<NodeId> {
        let mut ids = Vec::new();
        if !self.contains(node_id) {
            return ids;
        }

        let mut stack = vec![node_id.to_string()];
        while let Some(id) = stack.pop() {
            stack.extend(self.children(&id).iter().rev().cloned());
            ids.push(id);
        }
        ids
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

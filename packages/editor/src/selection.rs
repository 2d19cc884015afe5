//! # Selection & Mode State
//!
//! The selected node is held as an id and resolved against the document on
//! every read, so edits to the node never leave a stale copy behind.

use pagecraft_model::NodeId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    selected: Option<NodeId>,
    preview_mode: bool,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn select(&mut self, node_id: NodeId) {
        self.selected = Some(node_id);
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    /// Clear the selection if it points at one of `removed`.
    /// Returns whether it was cleared.
    pub fn clear_if_removed(&mut self, removed: &[NodeId]) -> bool {
        match &self.selected {
            Some(id) if removed.iter().any(|r| r == id) => {
                self.selected = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_preview_mode(&self) -> bool {
        self.preview_mode
    }

    pub fn set_preview_mode(&mut self, enabled: bool) {
        self.preview_mode = enabled;
    }
}

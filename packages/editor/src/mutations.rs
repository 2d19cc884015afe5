//! # Document Mutations
//!
//! Serializable editing commands, one per user gesture.
//!
//! ## Mutation Semantics
//!
//! ### AddNode
//! - Creates a node with the defaults of its kind
//! - `columns` nodes come with two paragraph cells
//! - Fails if the parent does not exist (nothing is created)
//!
//! ### MoveNode
//! - Relocates a node before/after a reference node, or appends it inside
//! - Fails if the node or the reference is missing; the node stays where it was
//! - Fails if the reference lies inside the moved subtree (would create cycle)
//!
//! ### RemoveNode
//! - Removes the node and all descendants
//! - Clears the selection if it pointed anywhere into the removed subtree
//!
//! Every failed mutation leaves the document untouched.

use crate::document::Document;
use crate::EditorError;
use pagecraft_model::{NodeId, NodeKind, PropMap, StyleMap};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Placement of a moved node relative to its reference node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Before,
    After,
    Inside,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Position::Before => "before",
            Position::After => "after",
            Position::Inside => "inside",
        })
    }
}

/// Partial update of a node. Present fields replace the whole field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<StyleMap>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<PropMap>,
}

impl NodePatch {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Default::default()
        }
    }

    pub fn props(props: PropMap) -> Self {
        Self {
            props: Some(props),
            ..Default::default()
        }
    }

    pub fn styles(styles: StyleMap) -> Self {
        Self {
            styles: Some(styles),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_none() && self.styles.is_none() && self.props.is_none()
    }
}

/// Editing commands
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Create a node, at the root or inside `parent_id`, at `index` or appended
    AddNode {
        kind: NodeKind,
        #[serde(default)]
        parent_id: Option<NodeId>,
        #[serde(default)]
        index: Option<usize>,
    },

    /// Shallow-merge fields into a node
    UpdateNode { node_id: NodeId, patch: NodePatch },

    /// Set a single style property
    SetNodeStyle {
        node_id: NodeId,
        property: String,
        value: String,
    },

    /// Move a node relative to a reference node
    MoveNode {
        node_id: NodeId,
        target_id: NodeId,
        position: Position,
    },

    /// Remove a node and its subtree
    RemoveNode { node_id: NodeId },

    /// Replace the selection (`None` clears it)
    SelectNode {
        #[serde(default)]
        node_id: Option<NodeId>,
    },

    /// Toggle read-only preview mode
    SetPreviewMode { enabled: bool },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Parent not found: {0}")]
    ParentNotFound(NodeId),

    #[error("Move target not found: {0}")]
    TargetNotFound(NodeId),

    #[error("Moving {node_id} relative to {target_id} would create cycle")]
    CycleDetected { node_id: NodeId, target_id: NodeId },
}

/// What an applied mutation changed
#[derive(Debug, Clone, PartialEq)]
pub enum MutationEffect {
    Created(NodeId),
    Removed(Vec<NodeId>),
    Updated,
    Unchanged,
}

/// Result of applying a mutation through [`Document::apply`]
#[derive(Debug, Clone, PartialEq)]
pub struct MutationResult {
    /// Document version after the mutation
    pub version: u64,

    pub effect: MutationEffect,
}

impl MutationResult {
    pub fn created(&self) -> Option<&str> {
        match &self.effect {
            MutationEffect::Created(id) => Some(id),
            _ => None,
        }
    }
}

impl Mutation {
    /// Parse a script: a JSON array of mutations, applied in order
    pub fn from_script(json: &str) -> Result<Vec<Mutation>, EditorError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Apply mutation to the document with validation
    pub fn apply(&self, doc: &mut Document) -> Result<MutationEffect, MutationError> {
        self.validate(doc)?;

        match self {
            Mutation::AddNode {
                kind,
                parent_id,
                index,
            } => doc
                .add_node(*kind, parent_id.as_deref(), *index)
                .map(MutationEffect::Created),

            Mutation::UpdateNode { node_id, patch } => {
                doc.update_node(node_id, patch.clone())?;
                Ok(MutationEffect::Updated)
            }

            Mutation::SetNodeStyle {
                node_id,
                property,
                value,
            } => {
                doc.update_node_style(node_id, property, value)?;
                Ok(MutationEffect::Updated)
            }

            Mutation::MoveNode {
                node_id,
                target_id,
                position,
            } => {
                let moved = doc.move_node(node_id, target_id, *position)?;
                Ok(if moved {
                    MutationEffect::Updated
                } else {
                    MutationEffect::Unchanged
                })
            }

            Mutation::RemoveNode { node_id } => doc.remove_node(node_id).map(MutationEffect::Removed),

            Mutation::SelectNode { node_id } => {
                doc.select_node(node_id.as_deref())?;
                Ok(MutationEffect::Updated)
            }

            Mutation::SetPreviewMode { enabled } => {
                doc.set_preview_mode(*enabled);
                Ok(MutationEffect::Updated)
            }
        }
    }

    /// Validate without applying
    pub fn validate(&self, doc: &Document) -> Result<(), MutationError> {
        match self {
            Mutation::AddNode { parent_id, .. } => match parent_id {
                Some(parent_id) if !doc.contains(parent_id) => {
                    Err(MutationError::ParentNotFound(parent_id.clone()))
                }
                _ => Ok(()),
            },

            Mutation::UpdateNode { node_id, .. }
            | Mutation::SetNodeStyle { node_id, .. }
            | Mutation::RemoveNode { node_id }
            | Mutation::SelectNode {
                node_id: Some(node_id),
            } => {
                if doc.contains(node_id) {
                    Ok(())
                } else {
                    Err(MutationError::NodeNotFound(node_id.clone()))
                }
            }

            Mutation::MoveNode {
                node_id,
                target_id,
                position,
            } => doc.check_move(node_id, target_id, *position).map(|_| ()),

            Mutation::SelectNode { node_id: None } | Mutation::SetPreviewMode { .. } => Ok(()),
        }
    }

    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::AddNode { .. } => "AddNode",
            Mutation::UpdateNode { .. } => "UpdateNode",
            Mutation::SetNodeStyle { .. } => "SetNodeStyle",
            Mutation::MoveNode { .. } => "MoveNode",
            Mutation::RemoveNode { .. } => "RemoveNode",
            Mutation::SelectNode { .. } => "SelectNode",
            Mutation::SetPreviewMode { .. } => "SetPreviewMode",
        }
    }
}

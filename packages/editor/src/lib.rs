//! # Pagecraft Editor
//!
//! Document model and mutation engine for the Pagecraft builder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ drag gestures / panels → Mutation commands  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: Document tree store                 │
//! │  - Arena of nodes keyed by id               │
//! │  - Add / update / move / remove             │
//! │  - Selection and preview mode               │
//! │  - SectionStore for the resume              │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ compilers: snapshot → HTML / React source   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Ids are identity**: assigned once, never reused, never re-typed
//! 2. **Validate, then apply**: a failed command leaves the document as it was
//! 3. **No cycles**: a node can never be moved under itself
//! 4. **Selection is an id**: resolved on read, cleared when its node goes
//!
//! ## Usage
//!
//! ```rust
//! use pagecraft_editor::{Document, Mutation, Position};
//! use pagecraft_model::NodeKind;
//!
//! let mut doc = Document::new();
//! let heading = doc.add_node(NodeKind::Heading, None, None)?;
//! let columns = doc.add_node(NodeKind::Columns, None, None)?;
//!
//! doc.apply(Mutation::MoveNode {
//!     node_id: heading.clone(),
//!     target_id: columns.clone(),
//!     position: Position::Inside,
//! })?;
//!
//! assert_eq!(doc.roots(), &[columns]);
//! # Ok::<(), pagecraft_editor::EditorError>(())
//! ```

mod document;
mod errors;
mod mutations;
mod sections;
mod selection;

pub use document::Document;
pub use errors::EditorError;
pub use mutations::{Mutation, MutationEffect, MutationError, MutationResult, NodePatch, Position};
pub use sections::{drag_reorder, SectionError, SectionStore};
pub use selection::Selection;

// Re-export model types for convenience
pub use pagecraft_model::{Node, NodeId, NodeKind, NodeSnapshot, Section, SectionType};

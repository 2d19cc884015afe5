//! # Pagecraft Model
//!
//! Plain data types shared by the editor and the export compilers:
//! content nodes, resume sections, kind defaults and id generation.

pub mod defaults;
pub mod id_generator;
pub mod node;
pub mod section;
pub mod seed;

pub use id_generator::{get_document_id, IDGenerator};
pub use node::{Node, NodeId, NodeKind, NodeSnapshot, PropMap, StyleMap};
pub use section::{
    EducationItem, ExperienceItem, HeaderData, Section, SectionData, SectionId, SectionType,
};
pub use seed::{seed_section, seed_sections};

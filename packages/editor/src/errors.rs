//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::mutations::MutationError),

    #[error("Section error: {0}")]
    Section(#[from] crate::sections::SectionError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

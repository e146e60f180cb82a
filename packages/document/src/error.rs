//! Error types for document edits

use crate::tree::ElementType;
use thiserror::Error;

/// Result type for document operations
pub type DocumentResult<T> = Result<T, DocumentError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocumentError {
    #[error("Cannot clone a {origin} into a {destination}: body elements have different types")]
    MismatchedElements {
        destination: ElementType,
        origin: ElementType,
    },
}

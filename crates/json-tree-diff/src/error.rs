//! Error type shared by the node model, the raw value adapter, the
//! operation codec and the patch algorithm.

use json_tree_path::{format_path, Key, PathError};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TreeError {
    /// A node was inserted into (or removed from) a tree it is not an
    /// immediate child of.
    #[error("STRUCTURAL_VIOLATION: expected tree '{parent}' to be parent of '{child}'")]
    StructuralViolation { parent: String, child: String },
    #[error(transparent)]
    Path(#[from] PathError),
    /// A container-only operation was attempted on a leaf or scalar.
    #[error("TYPE_MISMATCH: {0}")]
    TypeMismatch(String),
    #[error("INVALID_OPERATION_TYPE: unrecognized operation type '{0}'")]
    InvalidOperationType(String),
    #[error("INVALID_OPERATION: {0}")]
    InvalidOperation(String),
    #[error("INVALID_ENTRY: {0}")]
    InvalidEntry(String),
}

impl TreeError {
    pub(crate) fn structural(parent: &[Key], child: &[Key]) -> Self {
        TreeError::StructuralViolation {
            parent: format_path(parent),
            child: format_path(child),
        }
    }
}

pub type TreeResult<T> = Result<T, TreeError>;

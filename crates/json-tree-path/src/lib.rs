//! Key and path utilities for json-tree.
//!
//! A tree path is a sequence of [`Key`]s leading from the root to a node.
//! Nodes never point back at their parent; parentage is decided purely by
//! comparing paths, which is what the predicates in this crate do.
//!
//! # Example
//!
//! ```
//! use json_tree_path::{format_path, split_path, Key};
//!
//! let path = vec![Key::from("a"), Key::Index(1)];
//! let (prefix, last) = split_path(&path).unwrap();
//! assert_eq!(prefix, &[Key::from("a")]);
//! assert_eq!(last, &Key::Index(1));
//! assert_eq!(format_path(&path), r#"["a"][1]"#);
//! ```

use serde_json::Value;
use thiserror::Error;

pub mod types;
pub use types::{Key, Path};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("EMPTY_PATH: expected path with at least 1 entry")]
    EmptyPath,
}

/// Split a path into everything but the last key, and the last key.
///
/// # Errors
///
/// Returns [`PathError::EmptyPath`] for the root path.
///
/// ```
/// use json_tree_path::{split_path, PathError};
///
/// assert_eq!(split_path(&[]), Err(PathError::EmptyPath));
/// ```
pub fn split_path(path: &[Key]) -> Result<(&[Key], &Key), PathError> {
    match path.split_last() {
        Some((last, prefix)) => Ok((prefix, last)),
        None => Err(PathError::EmptyPath),
    }
}

/// Path of the child `key` under `path`.
pub fn child_path(path: &[Key], key: Key) -> Path {
    let mut out = Vec::with_capacity(path.len() + 1);
    out.extend_from_slice(path);
    out.push(key);
    out
}

/// Check if `parent` is a strict prefix of `child` (any depth).
pub fn is_child(parent: &[Key], child: &[Key]) -> bool {
    parent.len() < child.len() && child[..parent.len()] == *parent
}

/// Check if `child` sits exactly one level below `parent`.
pub fn is_parent_of(parent: &[Key], child: &[Key]) -> bool {
    child.len() == parent.len() + 1 && is_child(parent, child)
}

/// Render a path as a chain of bracketed JSON literals, e.g. `["a"][1]`.
///
/// Meant for logs and operation formatting; not parsed back.
pub fn format_path(path: &[Key]) -> String {
    let mut out = String::new();
    for key in path {
        out.push('[');
        match key {
            Key::Str(s) => out.push_str(&Value::String(s.clone()).to_string()),
            Key::Index(i) => out.push_str(&i.to_string()),
        }
        out.push(']');
    }
    out
}

/// Check if a string represents a valid non-negative integer index.
pub fn is_valid_index(index: &str) -> bool {
    match index.as_bytes() {
        [] => false,
        [b'0'] => true,
        [b'0', ..] => false,
        digits => digits.iter().all(u8::is_ascii_digit),
    }
}

//! Logic behind the `json-tree` binary.
//!
//! - `diff`: print the operations turning one document into another
//! - `patch`: apply an operation list to a document
//!
//! Both commands work on either realization: the node model (operations
//! `set-leaf` / `set-tree`) or raw values (operation `set`).

use serde_json::Value;
use thiserror::Error;

use crate::diff::diff;
use crate::error::TreeError;
use crate::node::Tree;
use crate::operation::{format_operation, from_json_operations, to_json_operations, Operation};
use crate::patch::apply_operations;

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CliError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Tree(#[from] TreeError),
}

// ── Options ───────────────────────────────────────────────────────────────

/// Which storage strategy a command runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Realization {
    /// Typed node tree; structured values are decomposed into subtrees.
    #[default]
    Node,
    /// Plain `serde_json::Value`, edited in place.
    Raw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// The operations as a JSON array.
    #[default]
    Json,
    /// One formatted operation per line.
    Text,
}

// ── diff ──────────────────────────────────────────────────────────────────

/// Diff two JSON documents given as strings.
pub fn diff_documents(
    before: &str,
    after: &str,
    realization: Realization,
) -> Result<Vec<Operation>, CliError> {
    let a: Value = serde_json::from_str(before)?;
    let b: Value = serde_json::from_str(after)?;
    Ok(match realization {
        Realization::Node => diff(&Tree::from_value(&a)?, &Tree::from_value(&b)?),
        Realization::Raw => diff(&a, &b),
    })
}

/// Render operations for output. JSON output is pretty-printed.
pub fn render_operations(ops: &[Operation], format: OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&to_json_operations(ops))?),
        OutputFormat::Text => Ok(ops
            .iter()
            .map(format_operation)
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

// ── patch ─────────────────────────────────────────────────────────────────

/// Apply the operation array `ops_json` to the document `doc_json`.
///
/// Returns the patched document as a pretty-printed JSON string.
pub fn patch_document(
    doc_json: &str,
    ops_json: &str,
    realization: Realization,
) -> Result<String, CliError> {
    let mut doc: Value = serde_json::from_str(doc_json)?;
    let ops = from_json_operations(&serde_json::from_str(ops_json)?)?;
    let result = match realization {
        Realization::Node => {
            let mut tree = Tree::from_value(&doc)?;
            apply_operations(&mut tree, &ops)?;
            tree.to_value()
        }
        Realization::Raw => {
            apply_operations(&mut doc, &ops)?;
            doc
        }
    };
    Ok(serde_json::to_string_pretty(&result)?)
}

// ── Tests ─────────────────────────────────────────────────────────────────

//! Recursive comparison of two document trees.
//!
//! [`compare_documents`] walks both trees in lock-step and returns every leaf
//! discrepancy as a [`Difference`], in traversal order:
//!
//! - Mappings: keys of `from` in `from` order (recursing, or REMOVAL), then
//!   keys only in `to`, in `to` order (ADDITION).
//! - Sequences: delegated to [`crate::identity::align`]. Identified elements
//!   extend the path with `field=value`; positional differences are reported
//!   at the list's own path.
//! - Scalars: one MODIFICATION when unequal.
//! - Different variants: one MODIFICATION carrying both whole subtrees.
//!
//! Comparison never fails and never mutates its inputs.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::identity::{align, Aligned, Alignment};
use crate::path::{Path, PathElement};
use crate::value::{Mapping, Value};

/// What happened at a [`Difference`]'s path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffKind {
    /// Present only in the `to` document.
    Addition,
    /// Present only in the `from` document.
    Removal,
    /// Present in both with different values.
    Modification,
}

impl fmt::Display for DiffKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffKind::Addition => f.write_str("ADDITION"),
            DiffKind::Removal => f.write_str("REMOVAL"),
            DiffKind::Modification => f.write_str("MODIFICATION"),
        }
    }
}

/// A single difference between two documents.
///
/// `from` is `None` for additions and `to` is `None` for removals. A scalar
/// null is `Some(Value::Scalar(Scalar::Null))`, never `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Difference {
    pub kind: DiffKind,
    pub path: Path,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<Value>,
}

impl Difference {
    pub fn addition(path: Path, to: Value) -> Self {
        Self {
            kind: DiffKind::Addition,
            path,
            from: None,
            to: Some(to),
        }
    }

    pub fn removal(path: Path, from: Value) -> Self {
        Self {
            kind: DiffKind::Removal,
            path,
            from: Some(from),
            to: None,
        }
    }

    pub fn modification(path: Path, from: Value, to: Value) -> Self {
        Self {
            kind: DiffKind::Modification,
            path,
            from: Some(from),
            to: Some(to),
        }
    }
}

/// Compare two documents from their roots.
pub fn compare_documents(from: &Value, to: &Value) -> Vec<Difference> {
    let mut out = Vec::new();
    compare(&Path::empty(), from, to, &mut out);
    debug!(differences = out.len(), "compared documents");
    out
}

/// Differences found in one document of a multi-document stream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentDiff {
    /// Zero-based position of the document in its stream.
    pub document: usize,
    pub differences: Vec<Difference>,
}

/// Compare two document streams pairwise by index.
///
/// Documents without a counterpart are reported as a single root-level
/// REMOVAL or ADDITION. Documents without differences are left out.
pub fn compare_streams(from: &[Value], to: &[Value]) -> Vec<DocumentDiff> {
    let count = from.len().max(to.len());
    let mut results = Vec::new();
    for document in 0..count {
        let differences = match (from.get(document), to.get(document)) {
            (Some(a), Some(b)) => compare_documents(a, b),
            (Some(a), None) => vec![Difference::removal(Path::empty(), a.clone())],
            (None, Some(b)) => vec![Difference::addition(Path::empty(), b.clone())],
            (None, None) => Vec::new(),
        };
        if !differences.is_empty() {
            results.push(DocumentDiff {
                document,
                differences,
            });
        }
    }
    debug!(
        from_documents = from.len(),
        to_documents = to.len(),
        changed = results.len(),
        "compared document streams"
    );
    results
}

/// Compare `from` and `to` located at `path`, appending differences to `out`.
pub fn compare(path: &Path, from: &Value, to: &Value, out: &mut Vec<Difference>) {
    match (from, to) {
        (Value::Scalar(a), Value::Scalar(b)) => {
            if a != b {
                out.push(Difference::modification(path.clone(), from.clone(), to.clone()));
            }
        }
        (Value::Mapping(a), Value::Mapping(b)) => compare_mappings(path, a, b, out),
        (Value::Sequence(a), Value::Sequence(b)) => compare_sequences(path, a, b, out),
        _ => {
            debug!(%path, from = from.kind_name(), to = to.kind_name(), "type change");
            out.push(Difference::modification(path.clone(), from.clone(), to.clone()));
        }
    }
}

fn compare_mappings(path: &Path, from: &Mapping, to: &Mapping, out: &mut Vec<Difference>) {
    for (key, from_value) in from.iter() {
        let child = path.append(PathElement::key(key));
        match to.get(key) {
            Some(to_value) => compare(&child, from_value, to_value, out),
            None => out.push(Difference::removal(child, from_value.clone())),
        }
    }

    for (key, to_value) in to.iter() {
        if !from.contains_key(key) {
            out.push(Difference::addition(
                path.append(PathElement::key(key)),
                to_value.clone(),
            ));
        }
    }
}

fn compare_sequences(path: &Path, from: &[Value], to: &[Value], out: &mut Vec<Difference>) {
    match align(from, to) {
        Alignment::Identified { field, entries } => {
            debug!(%path, field, "matching list entries by identifier");
            for entry in entries {
                match entry {
                    Aligned::Matched { id, from, to } => {
                        let child = path.append(PathElement::identified(field, id.clone()));
                        compare(&child, from, to, out);
                    }
                    Aligned::Removed { id, from } => out.push(Difference::removal(
                        path.append(PathElement::identified(field, id.clone())),
                        from.clone(),
                    )),
                    Aligned::Added { id, to } => out.push(Difference::addition(
                        path.append(PathElement::identified(field, id.clone())),
                        to.clone(),
                    )),
                }
            }
        }
        Alignment::Positional {
            pairs,
            removed,
            added,
        } => {
            // Positional differences are reported at the list path, never indexed.
            for (a, b) in pairs {
                if a != b {
                    out.push(Difference::modification(path.clone(), a.clone(), b.clone()));
                }
            }
            for item in removed {
                out.push(Difference::removal(path.clone(), item.clone()));
            }
            for item in added {
                out.push(Difference::addition(path.clone(), item.clone()));
            }
        }
    }
}

//! # confdiff-core
//!
//! Semantic, path-addressed differences between two configuration documents.
//!
//! Instead of comparing lines, confdiff walks two parsed YAML/JSON trees and
//! reports *what* changed and *where*: a value modified at
//! `/instance_groups/name=web/networks/name=concourse/static_ips`, a job added
//! at `/instance_groups/name=web/jobs/name=logger`. Lists of records are
//! matched by an identifying field (`name`, `key`, `id`, ...) so reordering an
//! identifiable list produces no differences.
//!
//! ## Quick start
//!
//! ```rust
//! use confdiff_core::{compare_documents, decode::from_yaml_str, DiffKind};
//!
//! let from = from_yaml_str("jobs:\n- name: atc\n  instances: 1\n").unwrap();
//! let to = from_yaml_str("jobs:\n- name: atc\n  instances: 2\n").unwrap();
//!
//! let diffs = compare_documents(&from[0], &to[0]);
//! assert_eq!(diffs.len(), 1);
//! assert_eq!(diffs[0].kind, DiffKind::Modification);
//! assert_eq!(diffs[0].path.to_string(), "/jobs/name=atc/instances");
//! ```
//!
//! ## Modules
//!
//! - [`value`] — the document tree (`Value`, `Scalar`, `Mapping`)
//! - [`path`] — locations inside a document and their `/a/name=b` rendering
//! - [`identity`] — identifying-field detection and list alignment
//! - [`compare`] — the recursive comparator
//! - [`decode`] — YAML/JSON text into `Value` trees
//! - [`filter`] — excluding differences below given paths
//! - [`report`] — text and JSON rendering, summaries
//! - [`error`] — error types

pub mod compare;
pub mod decode;
pub mod error;
pub mod filter;
pub mod identity;
pub mod path;
pub mod report;
pub mod value;

pub use compare::{compare_documents, compare_streams, DiffKind, Difference, DocumentDiff};
pub use error::{DiffError, Result};
pub use filter::{exclude_paths, exclude_stream_paths, PathPattern};
pub use identity::identity_field;
pub use path::{Path, PathElement};
pub use report::{render_json, render_text, Summary};
pub use value::{Mapping, Scalar, Value};

//! Locations inside a document tree.
//!
//! A [`Path`] is the list of steps from the document root to a node. Keys
//! render as the key name, identified sequence elements as `field=value`,
//! and the whole path is `/`-joined with a leading `/`:
//! `/instance_groups/name=web/networks/name=concourse/static_ips`.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::value::{Scalar, Value};

/// One step of a [`Path`].
#[derive(Debug, Clone, PartialEq)]
pub enum PathElement {
    /// A mapping field name.
    Key(String),
    /// A sequence element matched by the value of its identifying field.
    Identified { field: String, value: Scalar },
}

impl PathElement {
    pub fn key(name: impl Into<String>) -> Self {
        PathElement::Key(name.into())
    }

    pub fn identified(field: impl Into<String>, value: Scalar) -> Self {
        PathElement::Identified {
            field: field.into(),
            value,
        }
    }
}

impl fmt::Display for PathElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathElement::Key(name) => f.write_str(name),
            PathElement::Identified { field, value } => write!(f, "{field}={value}"),
        }
    }
}

/// An immutable path from the document root.
///
/// [`Path::append`] returns a new path; the receiver is left untouched so the
/// same prefix can be shared by sibling branches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    elements: Vec<PathElement>,
}

impl Path {
    /// The root path.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn append(&self, element: PathElement) -> Self {
        let mut elements = Vec::with_capacity(self.elements.len() + 1);
        elements.extend_from_slice(&self.elements);
        elements.push(element);
        Self { elements }
    }

    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    pub fn is_root(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Walk this path from `root` and return the node it names.
    ///
    /// `Identified` steps select the first mapping element of a sequence whose
    /// `field` holds `value`. Returns `None` when a step cannot be followed.
    pub fn resolve<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        self.elements
            .iter()
            .try_fold(root, |node, element| match (element, node) {
                (PathElement::Key(name), Value::Mapping(map)) => map.get(name),
                (PathElement::Identified { field, value }, Value::Sequence(items)) => {
                    items.iter().find(|item| {
                        item.as_mapping()
                            .and_then(|m| m.get(field))
                            .and_then(Value::as_scalar)
                            == Some(value)
                    })
                }
                _ => None,
            })
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.elements.is_empty() {
            return f.write_str("/");
        }
        for element in &self.elements {
            write!(f, "/{element}")?;
        }
        Ok(())
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

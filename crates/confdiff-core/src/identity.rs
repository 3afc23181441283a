//! Matching sequence elements by an identifying field.
//!
//! Lists of records in configuration files (jobs, networks, containers) are
//! usually keyed by a field such as `name`. When such a field exists, elements
//! are matched by its value rather than by position, so reordering a list or
//! inserting an entry in the middle does not show up as a cascade of changes.
//!
//! A pair of sequences is *identifiable* when every element of both is a
//! mapping and some field is present in all of them with a non-null scalar
//! value that is unique within each list. `name`, `key` and `id` win, in that
//! order; otherwise the first qualifying field of the first element does.

use std::collections::{HashMap, HashSet};

use crate::value::{Mapping, Scalar, Value};

/// Field names tried before any other qualifying field.
pub const PREFERRED_FIELDS: [&str; 3] = ["name", "key", "id"];

/// How two sequences at the same location line up.
#[derive(Debug, Clone, PartialEq)]
pub enum Alignment<'a> {
    /// Elements matched by the value of `field`.
    Identified {
        field: &'a str,
        entries: Vec<Aligned<'a>>,
    },
    /// No identifying field; elements line up by index.
    Positional {
        /// Elements at the same index in both lists.
        pairs: Vec<(&'a Value, &'a Value)>,
        /// Trailing elements only in the `from` list.
        removed: &'a [Value],
        /// Trailing elements only in the `to` list.
        added: &'a [Value],
    },
}

/// One element of an identified alignment.
#[derive(Debug, Clone, PartialEq)]
pub enum Aligned<'a> {
    Matched {
        id: &'a Scalar,
        from: &'a Value,
        to: &'a Value,
    },
    Removed {
        id: &'a Scalar,
        from: &'a Value,
    },
    Added {
        id: &'a Scalar,
        to: &'a Value,
    },
}

/// Decide how `from` and `to` should be aligned.
pub fn align<'a>(from: &'a [Value], to: &'a [Value]) -> Alignment<'a> {
    match identity_field(from, to) {
        Some(field) => Alignment::Identified {
            field,
            entries: match_by_identity(field, from, to),
        },
        None => {
            let common = from.len().min(to.len());
            Alignment::Positional {
                pairs: from[..common].iter().zip(&to[..common]).collect(),
                removed: &from[common..],
                added: &to[common..],
            }
        }
    }
}

/// Find the field that identifies the elements of both lists, if any.
pub fn identity_field<'a>(from: &'a [Value], to: &'a [Value]) -> Option<&'a str> {
    let mut from_maps = Vec::with_capacity(from.len());
    for item in from {
        from_maps.push(item.as_mapping()?);
    }
    let mut to_maps = Vec::with_capacity(to.len());
    for item in to {
        to_maps.push(item.as_mapping()?);
    }

    // A qualifying field is present in every element, so the first element's
    // keys are the only candidates, already in document order.
    let first: &'a Mapping = from_maps.first().or_else(|| to_maps.first()).copied()?;
    let qualifies = |field: &str| identifies(field, &from_maps) && identifies(field, &to_maps);

    PREFERRED_FIELDS
        .iter()
        .find_map(|&preferred| first.keys().find(|&key| key == preferred && qualifies(key)))
        .or_else(|| first.keys().find(|&field| qualifies(field)))
}

/// Pair up elements of `from` and `to` by the value of `field`.
///
/// Matched and removed entries come first, in `from` order; added entries
/// follow in `to` order. Elements lacking a usable identifier are skipped;
/// [`identity_field`] guarantees there are none.
pub fn match_by_identity<'a>(field: &str, from: &'a [Value], to: &'a [Value]) -> Vec<Aligned<'a>> {
    let to_by_id: HashMap<IdKey<'a>, &'a Value> = to
        .iter()
        .filter_map(|item| identifier(item, field).map(|id| (IdKey::of(id), item)))
        .collect();

    let mut entries = Vec::with_capacity(from.len().max(to.len()));
    let mut seen = HashSet::with_capacity(from.len());
    for item in from {
        let Some(id) = identifier(item, field) else {
            continue;
        };
        let key = IdKey::of(id);
        match to_by_id.get(&key) {
            Some(&other) => entries.push(Aligned::Matched {
                id,
                from: item,
                to: other,
            }),
            None => entries.push(Aligned::Removed { id, from: item }),
        }
        seen.insert(key);
    }

    for item in to {
        if let Some(id) = identifier(item, field) {
            if !seen.contains(&IdKey::of(id)) {
                entries.push(Aligned::Added { id, to: item });
            }
        }
    }

    entries
}

fn identifier<'a>(item: &'a Value, field: &str) -> Option<&'a Scalar> {
    match item.as_mapping()?.get(field)? {
        Value::Scalar(Scalar::Null) => None,
        Value::Scalar(scalar) => Some(scalar),
        _ => None,
    }
}

/// `field` is present in every mapping with a distinct, non-null scalar value.
fn identifies(field: &str, maps: &[&Mapping]) -> bool {
    let mut ids = HashSet::with_capacity(maps.len());
    maps.iter().all(|map| match map.get(field) {
        Some(Value::Scalar(Scalar::Null)) | None => false,
        Some(Value::Scalar(scalar)) => ids.insert(IdKey::of(scalar)),
        Some(_) => false,
    })
}

/// Hashable view of an identifier with the same equality as [`Scalar`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum IdKey<'a> {
    Null,
    Bool(bool),
    Integer(i64),
    Float(u64),
    String(&'a str),
}

impl<'a> IdKey<'a> {
    fn of(scalar: &'a Scalar) -> Self {
        match scalar {
            Scalar::Null => IdKey::Null,
            Scalar::Bool(b) => IdKey::Bool(*b),
            Scalar::Integer(i) => IdKey::Integer(*i),
            Scalar::Float(x) if x.is_nan() => IdKey::Float(f64::NAN.to_bits()),
            // 0.0 and -0.0 compare equal.
            Scalar::Float(x) if *x == 0.0 => IdKey::Float(0.0f64.to_bits()),
            Scalar::Float(x) => IdKey::Float(x.to_bits()),
            Scalar::String(s) => IdKey::String(s),
        }
    }
}

//! Turning YAML and JSON text into [`Value`] trees.
//!
//! Parsing itself is done by `serde_yaml` and `serde_json`; this module only
//! maps their value types onto the document model:
//!
//! - anchors and aliases are resolved by the YAML parser
//! - YAML tags are dropped, the tagged value is kept
//! - non-string scalar keys (`1`, `true`, `~`) become their text form
//! - integers that fit `i64` stay integers, every other number is a float

use serde::Deserialize;
use tracing::trace;

use crate::error::{DiffError, Result};
use crate::value::{Mapping, Scalar, Value};

/// Parse a YAML stream into one [`Value`] per document.
///
/// A stream without content (empty, only comments, directives or document
/// markers) yields no documents. JSON text is valid YAML and is accepted too.
pub fn from_yaml_str(text: &str) -> Result<Vec<Value>> {
    let mut documents = Vec::new();
    if !has_content(text) {
        return Ok(documents);
    }
    for document in serde_yaml::Deserializer::from_str(text) {
        let raw = serde_yaml::Value::deserialize(document)?;
        trace!(index = documents.len(), "decoded YAML document");
        documents.push(from_yaml_value(raw)?);
    }
    Ok(documents)
}

/// True when some line of `text` holds more than whitespace, a comment, a
/// directive or a document marker.
fn has_content(text: &str) -> bool {
    text.lines().any(|line| {
        let line = line.trim();
        !(line.is_empty()
            || line.starts_with('#')
            || line.starts_with('%')
            || is_marker(line, "---")
            || is_marker(line, "..."))
    })
}

/// `line` is the marker alone, or the marker followed by a comment.
fn is_marker(line: &str, marker: &str) -> bool {
    match line.strip_prefix(marker) {
        Some("") => true,
        Some(rest) => rest.starts_with(char::is_whitespace) && rest.trim_start().starts_with('#'),
        None => false,
    }
}

/// Parse a single JSON document, keeping object key order.
pub fn from_json_str(text: &str) -> Result<Value> {
    let raw: serde_json::Value = serde_json::from_str(text)?;
    from_json_value(raw)
}

/// Convert an already-parsed YAML value.
pub fn from_yaml_value(raw: serde_yaml::Value) -> Result<Value> {
    use serde_yaml::Value as Yaml;

    Ok(match raw {
        Yaml::Null => Value::null(),
        Yaml::Bool(b) => Value::Scalar(Scalar::Bool(b)),
        Yaml::Number(n) => Value::Scalar(yaml_number(&n)),
        Yaml::String(s) => Value::Scalar(Scalar::String(s)),
        Yaml::Sequence(items) => Value::Sequence(
            items
                .into_iter()
                .map(from_yaml_value)
                .collect::<Result<Vec<_>>>()?,
        ),
        Yaml::Mapping(raw_map) => {
            let mut map = Mapping::new();
            // The YAML parser rejects repeated keys, so a duplicate here comes
            // from two distinct keys sharing a text form (`1` and `'1'`).
            for (key, value) in raw_map {
                map.insert(yaml_key(key)?, from_yaml_value(value)?)
                    .map_err(|err| match err {
                        DiffError::DuplicateKey { key } => DiffError::KeyCollision { key },
                        other => other,
                    })?;
            }
            Value::Mapping(map)
        }
        Yaml::Tagged(tagged) => from_yaml_value(tagged.value)?,
    })
}

/// Convert an already-parsed JSON value.
pub fn from_json_value(raw: serde_json::Value) -> Result<Value> {
    use serde_json::Value as Json;

    Ok(match raw {
        Json::Null => Value::null(),
        Json::Bool(b) => Value::Scalar(Scalar::Bool(b)),
        Json::Number(n) => Value::Scalar(match n.as_i64() {
            Some(i) => Scalar::Integer(i),
            None => Scalar::Float(n.as_f64().unwrap_or(f64::NAN)),
        }),
        Json::String(s) => Value::Scalar(Scalar::String(s)),
        Json::Array(items) => Value::Sequence(
            items
                .into_iter()
                .map(from_json_value)
                .collect::<Result<Vec<_>>>()?,
        ),
        Json::Object(object) => {
            let mut map = Mapping::new();
            for (key, value) in object {
                map.insert(key, from_json_value(value)?)?;
            }
            Value::Mapping(map)
        }
    })
}

fn yaml_number(n: &serde_yaml::Number) -> Scalar {
    match n.as_i64() {
        Some(i) => Scalar::Integer(i),
        None => Scalar::Float(n.as_f64().unwrap_or(f64::NAN)),
    }
}

fn yaml_key(key: serde_yaml::Value) -> Result<String> {
    use serde_yaml::Value as Yaml;

    match key {
        Yaml::String(s) => Ok(s),
        Yaml::Null => Ok("null".to_string()),
        Yaml::Bool(b) => Ok(b.to_string()),
        Yaml::Number(n) => Ok(yaml_number(&n).to_string()),
        Yaml::Tagged(tagged) => yaml_key(tagged.value),
        other => Err(DiffError::UnsupportedKey(
            serde_yaml::to_string(&other)
                .unwrap_or_default()
                .trim_end()
                .to_string(),
        )),
    }
}

impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        match value {
            Value::Scalar(Scalar::Null) => serde_json::Value::Null,
            Value::Scalar(Scalar::Bool(b)) => serde_json::Value::Bool(*b),
            Value::Scalar(Scalar::Integer(i)) => serde_json::Value::from(*i),
            // Non-finite floats have no JSON form.
            Value::Scalar(Scalar::Float(x)) => serde_json::Number::from_f64(*x)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Scalar(Scalar::String(s)) => serde_json::Value::String(s.clone()),
            Value::Sequence(items) => {
                serde_json::Value::Array(items.iter().map(serde_json::Value::from).collect())
            }
            Value::Mapping(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(k, v)| (k.to_string(), serde_json::Value::from(v)))
                    .collect(),
            ),
        }
    }
}

//! Path exclusion -- drop differences under uninteresting subtrees.
//!
//! Patterns use the same syntax as rendered paths:
//!
//! - `/metadata/annotations` -- everything at or below that key
//! - `/instance_groups/name=web/jobs` -- below an identified list element
//! - `/*/labels` -- `*` matches any single path element
//!
//! A pattern matches a difference when the pattern's elements are a prefix of
//! the difference's path elements.
//!
//! Keys containing `/` or `~` are written with JSON-pointer escapes: `~1` for
//! `/` and `~0` for `~`, so `/metadata/annotations/app.io~1rev` names the
//! annotation `app.io/rev`.

use crate::compare::{Difference, DocumentDiff};
use crate::error::{DiffError, Result};
use crate::path::Path;

/// A parsed exclusion pattern.
///
/// Each segment is either the rendered form of a path element
/// (`name` or `field=value`) or the wildcard `*`.
#[derive(Debug, Clone, PartialEq)]
pub struct PathPattern {
    segments: Vec<String>,
}

impl PathPattern {
    /// Parse a `/`-separated pattern. The leading `/` is required.
    pub fn parse(pattern: &str) -> Result<Self> {
        let rest = pattern
            .strip_prefix('/')
            .ok_or_else(|| DiffError::Pattern(format!("'{pattern}' must start with '/'")))?;
        if rest.is_empty() {
            return Ok(Self { segments: Vec::new() });
        }
        let segments = rest
            .split('/')
            .map(|segment| {
                if segment.is_empty() {
                    return Err(DiffError::Pattern(format!("'{pattern}' has an empty segment")));
                }
                unescape(segment)
                    .ok_or_else(|| DiffError::Pattern(format!("'{pattern}' has an invalid '~' escape")))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { segments })
    }

    /// True when `path` is at or below the location this pattern names.
    pub fn matches(&self, path: &Path) -> bool {
        let elements = path.elements();
        self.segments.len() <= elements.len()
            && self
                .segments
                .iter()
                .zip(elements)
                .all(|(segment, element)| segment == "*" || *segment == element.to_string())
    }
}

/// Decode `~1` to `/` and `~0` to `~`. Any other use of `~` is invalid.
fn unescape(segment: &str) -> Option<String> {
    let mut out = String::with_capacity(segment.len());
    let mut chars = segment.chars();
    while let Some(c) = chars.next() {
        match c {
            '~' => match chars.next()? {
                '0' => out.push('~'),
                '1' => out.push('/'),
                _ => return None,
            },
            c => out.push(c),
        }
    }
    Some(out)
}

/// Remove every difference whose path matches one of `patterns`.
///
/// The relative order of the remaining differences is unchanged.
///
/// # Examples
///
/// ```
/// use confdiff_core::{compare_documents, decode::from_yaml_str, exclude_paths};
///
/// let from = &from_yaml_str("meta: {rev: 1}\nspec: {replicas: 1}").unwrap()[0];
/// let to = &from_yaml_str("meta: {rev: 2}\nspec: {replicas: 3}").unwrap()[0];
/// let kept = exclude_paths(compare_documents(from, to), &["/meta"]).unwrap();
/// assert_eq!(kept.len(), 1);
/// assert_eq!(kept[0].path.to_string(), "/spec/replicas");
/// ```
pub fn exclude_paths(differences: Vec<Difference>, patterns: &[&str]) -> Result<Vec<Difference>> {
    if patterns.is_empty() {
        return Ok(differences);
    }
    let parsed = parse_all(patterns)?;
    Ok(retain_unmatched(differences, &parsed))
}

/// Apply [`exclude_paths`] to every document of a stream result, dropping
/// documents left without differences.
pub fn exclude_stream_paths(results: Vec<DocumentDiff>, patterns: &[&str]) -> Result<Vec<DocumentDiff>> {
    if patterns.is_empty() {
        return Ok(results);
    }
    let parsed = parse_all(patterns)?;
    Ok(results
        .into_iter()
        .map(|result| DocumentDiff {
            document: result.document,
            differences: retain_unmatched(result.differences, &parsed),
        })
        .filter(|result| !result.differences.is_empty())
        .collect())
}

fn parse_all(patterns: &[&str]) -> Result<Vec<PathPattern>> {
    patterns.iter().map(|p| PathPattern::parse(p)).collect()
}

fn retain_unmatched(mut differences: Vec<Difference>, patterns: &[PathPattern]) -> Vec<Difference> {
    differences.retain(|d| !patterns.iter().any(|p| p.matches(&d.path)));
    differences
}

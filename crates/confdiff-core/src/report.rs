//! Rendering comparison results for people and for machines.
//!
//! Renderers never reorder or drop differences; filtering happens in
//! [`crate::filter`] before rendering.

use std::fmt;

use serde::Serialize;

use crate::compare::{DiffKind, Difference, DocumentDiff};
use crate::error::Result;
use crate::value::Value;

/// Render a flat difference list as plain text.
///
/// Each difference becomes a block headed by its path:
///
/// ```text
/// /some/yaml/structure/name
///   ± value change
///     - foobar
///     + fOObAr
/// ```
pub fn render_differences(differences: &[Difference]) -> Result<String> {
    let mut out = String::new();
    for (i, difference) in differences.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        render_difference(difference, &mut out)?;
    }
    Ok(out)
}

/// Render a stream result as plain text.
///
/// `(document N)` headers are added as soon as any document other than the
/// first one has differences.
pub fn render_text(results: &[DocumentDiff]) -> Result<String> {
    let headers = results.iter().any(|r| r.document > 0);
    let mut out = String::new();
    for (i, result) in results.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        if headers {
            out.push_str(&format!("(document {})\n\n", result.document + 1));
        }
        out.push_str(&render_differences(&result.differences)?);
    }
    Ok(out)
}

/// Render a stream result as a pretty-printed JSON array.
///
/// Absent sides are omitted rather than written as `null`.
pub fn render_json(results: &[DocumentDiff]) -> Result<String> {
    Ok(serde_json::to_string_pretty(results)?)
}

fn render_difference(difference: &Difference, out: &mut String) -> Result<()> {
    out.push_str(&difference.path.to_string());
    out.push('\n');
    match (difference.kind, &difference.from, &difference.to) {
        (DiffKind::Modification, Some(from), Some(to)) => {
            out.push_str("  ± value change\n");
            push_value(out, "    - ", from)?;
            push_value(out, "    + ", to)?;
        }
        (DiffKind::Addition, _, Some(to)) => {
            out.push_str("  + added:\n");
            push_value(out, "    ", to)?;
        }
        (DiffKind::Removal, Some(from), _) => {
            out.push_str("  - removed:\n");
            push_value(out, "    ", from)?;
        }
        // Constructors never build any other combination.
        _ => {}
    }
    Ok(())
}

/// Write `value` as YAML, prefixing the first line with `lead` and indenting
/// continuation lines to the same width.
fn push_value(out: &mut String, lead: &str, value: &Value) -> Result<()> {
    let yaml = serde_yaml::to_string(value)?;
    let indent = " ".repeat(lead.chars().count());
    for (i, line) in yaml.trim_end_matches('\n').lines().enumerate() {
        out.push_str(if i == 0 { lead } else { indent.as_str() });
        out.push_str(line);
        out.push('\n');
    }
    Ok(())
}

/// Counts of each kind of difference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub additions: usize,
    pub removals: usize,
    pub modifications: usize,
}

impl Summary {
    pub fn from_differences(differences: &[Difference]) -> Self {
        differences.iter().fold(Self::default(), |mut summary, d| {
            match d.kind {
                DiffKind::Addition => summary.additions += 1,
                DiffKind::Removal => summary.removals += 1,
                DiffKind::Modification => summary.modifications += 1,
            }
            summary
        })
    }

    pub fn from_stream(results: &[DocumentDiff]) -> Self {
        results
            .iter()
            .map(|r| Self::from_differences(&r.differences))
            .fold(Self::default(), |a, b| Self {
                additions: a.additions + b.additions,
                removals: a.removals + b.removals,
                modifications: a.modifications + b.modifications,
            })
    }

    pub fn total(&self) -> usize {
        self.additions + self.removals + self.modifications
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} additions, {} removals, {} modifications",
            self.additions, self.removals, self.modifications
        )
    }
}

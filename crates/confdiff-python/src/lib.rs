//! # confdiff-python
//!
//! Python bindings for the confdiff comparator, built with PyO3.
//!
//! Exposes the following functions to Python as the `confdiff` module:
//!
//! - `between(from_yaml, to_yaml, exclude=None)` -- JSON report string
//! - `between_text(from_yaml, to_yaml, exclude=None)` -- human-readable report
//! - `summary(from_yaml, to_yaml)` -- `(additions, removals, modifications)`

use confdiff_core::decode::from_yaml_str;
use confdiff_core::{compare_streams, exclude_stream_paths, render_json, render_text, DocumentDiff, Summary};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

fn compare(from_yaml: &str, to_yaml: &str, exclude: Option<Vec<String>>) -> PyResult<Vec<DocumentDiff>> {
    let from = from_yaml_str(from_yaml).map_err(|e| PyValueError::new_err(e.to_string()))?;
    let to = from_yaml_str(to_yaml).map_err(|e| PyValueError::new_err(e.to_string()))?;
    let patterns = exclude.unwrap_or_default();
    let refs: Vec<&str> = patterns.iter().map(|s| s.as_str()).collect();
    exclude_stream_paths(compare_streams(&from, &to), &refs).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Compare two YAML (or JSON) document streams.
///
/// Args:
///     from_yaml: The source documents.
///     to_yaml: The target documents.
///     exclude: Optional list of path patterns such as `"/metadata"`.
///
/// Returns:
///     A JSON array with one `{document, differences}` object per changed document.
///
/// Raises:
///     ValueError: If either input is invalid or a pattern is malformed.
#[pyfunction]
#[pyo3(signature = (from_yaml, to_yaml, exclude=None))]
fn between(from_yaml: &str, to_yaml: &str, exclude: Option<Vec<String>>) -> PyResult<String> {
    render_json(&compare(from_yaml, to_yaml, exclude)?).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Compare two document streams and render the human-readable report.
///
/// Raises:
///     ValueError: If either input is invalid or a pattern is malformed.
#[pyfunction]
#[pyo3(signature = (from_yaml, to_yaml, exclude=None))]
fn between_text(from_yaml: &str, to_yaml: &str, exclude: Option<Vec<String>>) -> PyResult<String> {
    render_text(&compare(from_yaml, to_yaml, exclude)?).map_err(|e| PyValueError::new_err(e.to_string()))
}

/// Count the differences between two document streams.
///
/// Returns:
///     A tuple `(additions, removals, modifications)`.
#[pyfunction]
fn summary(from_yaml: &str, to_yaml: &str) -> PyResult<(usize, usize, usize)> {
    let s = Summary::from_stream(&compare(from_yaml, to_yaml, None)?);
    Ok((s.additions, s.removals, s.modifications))
}

/// The `confdiff` Python module, implemented in Rust via PyO3.
#[pymodule]
fn confdiff(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(between, m)?)?;
    m.add_function(wrap_pyfunction!(between_text, m)?)?;
    m.add_function(wrap_pyfunction!(summary, m)?)?;
    Ok(())
}

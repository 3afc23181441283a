//! WASM bindings for confdiff-core.
//!
//! Exposes `between` and `between_excluding` as `#[wasm_bindgen]` functions
//! that can be called from JavaScript/TypeScript. Both take YAML (or JSON)
//! text and return the JSON report.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p confdiff-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/confdiff-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/confdiff_wasm.wasm
//! ```

use confdiff_core::decode::from_yaml_str;
use confdiff_core::{compare_streams, exclude_stream_paths, render_json};
use wasm_bindgen::prelude::*;

/// Compare two YAML document streams.
///
/// Returns the JSON report, or throws a JS error if either input is invalid.
#[wasm_bindgen]
pub fn between(from_yaml: &str, to_yaml: &str) -> std::result::Result<String, JsValue> {
    report(from_yaml, to_yaml, &[]).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Compare two YAML document streams, dropping differences under `exclude`.
///
/// Throws a JS error if either input or any pattern is invalid.
#[wasm_bindgen(js_name = betweenExcluding)]
pub fn between_excluding(
    from_yaml: &str,
    to_yaml: &str,
    exclude: Vec<String>,
) -> std::result::Result<String, JsValue> {
    let patterns: Vec<&str> = exclude.iter().map(|s| s.as_str()).collect();
    report(from_yaml, to_yaml, &patterns).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn report(from_yaml: &str, to_yaml: &str, exclude: &[&str]) -> confdiff_core::Result<String> {
    let from = from_yaml_str(from_yaml)?;
    let to = from_yaml_str(to_yaml)?;
    render_json(&exclude_stream_paths(compare_streams(&from, &to), exclude)?)
}

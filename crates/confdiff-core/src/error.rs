//! Error types for document decoding and value construction.
//!
//! Comparison itself never fails; every error here is raised while building
//! the value trees or while parsing exclusion patterns.

use thiserror::Error;

/// Errors that can occur before two documents are compared.
#[derive(Error, Debug)]
pub enum DiffError {
    /// A mapping was built with the same key twice.
    #[error("duplicate mapping key: {key}")]
    DuplicateKey { key: String },

    /// Two distinct YAML keys, such as `1` and `'1'`, share the same text form.
    #[error("mapping keys collide after conversion to text: {key}")]
    KeyCollision { key: String },

    /// A mapping key was itself a mapping or a sequence.
    #[error("unsupported mapping key: {0}")]
    UnsupportedKey(String),

    /// The input was not valid JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input was not valid YAML.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// An exclusion pattern could not be parsed.
    #[error("invalid path pattern: {0}")]
    Pattern(String),
}

/// Convenience alias used throughout confdiff-core.
pub type Result<T> = std::result::Result<T, DiffError>;

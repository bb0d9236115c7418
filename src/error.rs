//! Error types for hotquad.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, HotquadError>;

/// Failures that are not ordinary "rejected" outcomes.
///
/// Rejected inserts (out of bounds, duplicates) and absent removals are
/// reported as `false` and never appear here.
#[derive(Debug, Error)]
pub enum HotquadError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A point inside a subdivided node was claimed by none of its children.
    #[error("Partition invariant violated: ({x}, {y}) fits no child of a depth {depth} node")]
    PartitionInvariant { x: f64, y: f64, depth: u32 },

    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "toml")]
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

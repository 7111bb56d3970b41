//! Error types for catalog loading and geometry resolution.

use crate::catalog::MotifKey;
use thiserror::Error;

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, MotifError>;

/// Errors raised while building a catalog or resolving motif geometry.
#[derive(Debug, Error)]
pub enum MotifError {
    /// Two records share the same `(category, variant)` key.
    #[error("duplicate motif key {key}")]
    DuplicateKey { key: MotifKey },

    /// A run is not four integers or has a non-positive width/height.
    #[error("malformed run #{index} in motif {key}: {reason}")]
    MalformedRun {
        key: MotifKey,
        /// Position of the run within the motif's authored run list.
        index: usize,
        reason: String,
    },

    /// Lookup of a key the catalog does not contain.
    #[error("motif {key} not found")]
    NotFound { key: MotifKey },

    /// Bounding box with `min > max` on either axis.
    #[error("invalid bounds: min ({min_x}, {min_y}) exceeds max ({max_x}, {max_y})")]
    InvalidBounds {
        min_x: i64,
        min_y: i64,
        max_x: i64,
        max_y: i64,
    },

    /// Bounds are valid but hold more cells than one grid may allocate.
    #[error(
        "bounds ({min_x}, {min_y})..=({max_x}, {max_y}) exceed the {limit} cell grid limit"
    )]
    GridTooLarge {
        min_x: i64,
        min_y: i64,
        max_x: i64,
        max_y: i64,
        limit: usize,
    },

    /// No records were supplied.
    #[error("no motif records found in input")]
    EmptyInput,

    /// The table does not conform to the bundled JSON Schema.
    #[error("motif table failed schema validation:\n{0}")]
    Schema(String),

    /// JSON syntax or shape error.
    #[error("unable to parse motif table: {0}")]
    Parse(#[from] serde_json::Error),

    /// JSON error on one line of a newline-delimited table.
    #[error("unable to parse motif record from line {line}: {source}")]
    ParseLine {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

//! Error types for changeset operations.
//!
//! Follows ODF-REP: Library crates use `thiserror` for explicit error enums.

use std::ops::Range;

use thiserror::Error;

/// Error types for edit operations.
///
/// Each variant represents a specific failure mode in the editing pipeline.
#[derive(Error, Debug)]
pub enum EditError {
    /// Two staged edits target intersecting ranges.
    #[error("Overlapping edits: {first:?} and {second:?}")]
    Overlap {
        /// Range already staged.
        first: Range<usize>,
        /// Range rejected.
        second: Range<usize>,
    },

    /// Edit range falls outside the source or splits a character.
    #[error("Edit range {range:?} is invalid for a source of {len} bytes")]
    OutOfBounds {
        /// Offending range.
        range: Range<usize>,
        /// Source length in bytes.
        len: usize,
    },

    /// Writing the modified file failed.
    #[error("Failed to write {path}: {source}")]
    Write {
        /// Target path.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

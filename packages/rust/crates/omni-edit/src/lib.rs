#![allow(clippy::doc_markdown)]

//! omni-edit - Atomic Changesets for Omni DevEnv
//!
//! Collects non-overlapping text replacements and insertions for one file and
//! commits them in a single rewrite, with a unified diff for previews.
//!
//! # Architecture (ODF-REP Compliant)
//!
//! ```text
//! omni-edit/src/
//! ├── lib.rs        # Re-exports (this file)
//! ├── error.rs      # EditError enum (thiserror)
//! ├── types.rs      # EditResult, EditLocation
//! ├── diff.rs       # Diff generation utilities
//! └── changeset.rs  # Changeset: stage, validate, commit
//! ```
//!
//! # Example
//!
//! ```rust
//! use omni_edit::Changeset;
//!
//! let source = "function add(a, b) { return a + b }\n";
//! let mut changes = Changeset::new();
//! changes.replace(0..8, "/** Adds. */\nfunction").unwrap();
//! let result = changes.commit(source).unwrap();
//! assert!(result.modified.starts_with("/** Adds. */\nfunction add"));
//! ```

// ============================================================================
// Module Declarations (ODF-REP: Atomic Structure)
// ============================================================================

mod changeset;
pub mod diff;
mod error;
mod types;

// ============================================================================
// Public Re-exports
// ============================================================================

pub use changeset::{Changeset, PendingEdit};
pub use error::EditError;
pub use types::{EditLocation, EditResult};

// Re-export diff utility for external use
pub use diff::{generate_file_diff, generate_unified_diff};

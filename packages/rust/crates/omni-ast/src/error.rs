//! Error types for structural matching.
//!
//! Follows ODF-REP: Library crates use `thiserror` for explicit error enums.

use thiserror::Error;

/// Error types for AST operations.
#[derive(Error, Debug)]
pub enum AstError {
    /// Language or extension not supported by any grammar.
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// ast-grep rejected a lowered rule.
    #[error("Invalid rule: {0}")]
    InvalidRule(String),
}

//! Error types for the documentation pipeline.

use thiserror::Error;

use omni_ast::AstError;
use omni_edit::EditError;

/// File-level and run-level failures.
#[derive(Error, Debug)]
pub enum DocsError {
    /// No source files were selected.
    #[error("No files to process")]
    NoFiles,

    /// Neither the missing-doc nor the update pass is enabled.
    #[error("No mode selected: enable --missing or --update")]
    NoMode,

    /// File extension is not handled by any language adapter.
    #[error("Unsupported file type: {0}")]
    UnsupportedFile(String),

    /// Reading a file or directory failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Offending path.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the configured size limit.
    #[error("File too large: {path} ({size} bytes, limit {limit})")]
    TooLarge {
        /// Offending path.
        path: String,
        /// Actual size in bytes.
        size: u64,
        /// Configured limit.
        limit: u64,
    },

    /// File contains NUL bytes.
    #[error("Binary file skipped: {0}")]
    Binary(String),

    /// File is not valid UTF-8.
    #[error("Not valid UTF-8: {path} (first invalid byte at offset {offset})")]
    NotUtf8 {
        /// Offending path.
        path: String,
        /// Byte offset of the first invalid sequence.
        offset: usize,
    },

    /// Invalid `--glob` pattern.
    #[error("Invalid glob pattern {pattern}: {message}")]
    Glob {
        /// The pattern as given.
        pattern: String,
        /// Parser message.
        message: String,
    },

    /// A match rule did not compile for the file's grammar.
    #[error(transparent)]
    Ast(#[from] AstError),

    /// Staging or committing an edit failed.
    #[error(transparent)]
    Edit(#[from] EditError),
}

/// Failures of a generation or judge call.
#[derive(Error, Debug)]
pub enum LlmError {
    /// Transport-level failure.
    #[error("LLM request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success status from the API.
    #[error("LLM API error {status}: {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// Response body did not match the chat completion shape.
    #[error("LLM response parse error: {message}; body: {body}")]
    Parse {
        /// Deserializer message.
        message: String,
        /// Raw body.
        body: String,
    },

    /// Response carried no usable message.
    #[error("LLM response has no content")]
    Empty,
}

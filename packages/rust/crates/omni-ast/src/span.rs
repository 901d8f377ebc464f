//! Owned node snapshots.
//!
//! A `NodeSpan` keeps what the edit pipeline needs from a node (kind, byte
//! range, text, position) without borrowing the tree.

use std::ops::Range;

use serde::Serialize;

use crate::re_exports::{Doc, Node};

/// Snapshot of a syntax node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeSpan {
    /// Syntax kind
    pub kind: String,
    /// Start byte position
    pub start: usize,
    /// End byte position
    pub end: usize,
    /// Line number of the start (1-indexed)
    pub line: usize,
    /// Column of the start in characters (0-indexed)
    pub column: usize,
    /// Whitespace that precedes the node on its first line.
    ///
    /// Equals the literal line prefix when that prefix is blank, otherwise
    /// `column` spaces.
    pub indent: String,
    /// Node text
    pub text: String,
}

impl NodeSpan {
    /// Snapshot an ast-grep node.
    #[must_use]
    pub fn from_node<D: Doc>(node: &Node<'_, D>, source: &str) -> Self {
        Self::at(source, node.kind().to_string(), node.range())
    }

    /// Snapshot the byte `range` of `source` as a node of `kind`.
    #[must_use]
    pub fn at(source: &str, kind: impl Into<String>, range: Range<usize>) -> Self {
        let start = range.start.min(source.len());
        let end = range.end.clamp(start, source.len());
        let line_start = source[..start].rfind('\n').map_or(0, |i| i + 1);
        let prefix = &source[line_start..start];
        let column = prefix.chars().count();
        let indent = if prefix.chars().all(char::is_whitespace) {
            prefix.to_string()
        } else {
            " ".repeat(column)
        };

        Self {
            kind: kind.into(),
            start,
            end,
            line: source[..start].matches('\n').count() + 1,
            column,
            indent,
            text: source[start..end].to_string(),
        }
    }

    /// Byte range covered by the node.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Get the length of the node text in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the node is zero-width
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

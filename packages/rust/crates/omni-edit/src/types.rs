//! Core types for committed changesets.

use std::fmt::Write as _;

use serde::Serialize;

/// Result of committing a changeset.
///
/// Contains both the modified content and metadata about the changes made.
#[derive(Debug, Clone, Serialize)]
pub struct EditResult {
    /// Original content before modification.
    pub original: String,
    /// Modified content after replacement.
    pub modified: String,
    /// Number of replacements made.
    pub count: usize,
    /// Unified diff showing changes.
    pub diff: String,
    /// Individual edit locations, in source order.
    pub edits: Vec<EditLocation>,
}

/// Location of an individual edit within a file.
#[derive(Debug, Clone, Serialize)]
pub struct EditLocation {
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub column: usize,
    /// Original text that was replaced.
    pub original_text: String,
    /// New text after replacement.
    pub new_text: String,
}

impl EditResult {
    /// Result for a changeset with nothing staged.
    #[must_use]
    pub fn unchanged(content: &str) -> Self {
        Self {
            original: content.to_string(),
            modified: content.to_string(),
            count: 0,
            diff: String::new(),
            edits: Vec::new(),
        }
    }

    /// Whether the commit changed the text.
    #[must_use]
    pub fn is_changed(&self) -> bool {
        self.count > 0 && self.original != self.modified
    }

    /// Format edit result for display.
    ///
    /// Returns a human-readable summary followed by the diff.
    #[must_use]
    pub fn format(&self, path: Option<&str>) -> String {
        let mut output = String::new();

        if let Some(p) = path {
            let _ = writeln!(output, "// EDIT: {p}");
        }
        let _ = writeln!(output, "// Replacements: {}", self.count);

        if self.count == 0 {
            output.push_str("[No edits staged]\n");
            return output;
        }

        output.push_str("\n// Changes:\n");
        for edit in &self.edits {
            let first_line = edit.new_text.lines().next().unwrap_or_default();
            let _ = writeln!(output, "L{}:{} {}", edit.line, edit.column, first_line.trim());
        }

        output.push_str("\n// Diff:\n");
        output.push_str(&self.diff);

        output
    }
}

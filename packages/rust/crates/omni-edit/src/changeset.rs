//! Per-file batches of range replacements.
//!
//! A `Changeset` collects replacements against one immutable source text and
//! applies them together. Staged ranges never overlap, so the application
//! order (back to front) cannot shift a later edit.

use std::ops::Range;
use std::path::Path;

use crate::diff::generate_unified_diff;
use crate::error::EditError;
use crate::types::{EditLocation, EditResult};

/// One staged replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingEdit {
    /// Byte range in the original source.
    pub range: Range<usize>,
    /// Text that replaces the range.
    pub replacement: String,
}

/// Pending edits for a single file.
#[derive(Debug, Clone, Default)]
pub struct Changeset {
    edits: Vec<PendingEdit>,
}

impl Changeset {
    /// Create an empty changeset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a replacement of `range` with `replacement`.
    ///
    /// # Errors
    /// Returns `EditError::Overlap` when `range` intersects a staged edit.
    pub fn replace(
        &mut self,
        range: Range<usize>,
        replacement: impl Into<String>,
    ) -> Result<(), EditError> {
        if let Some(existing) = self.edits.iter().find(|e| overlaps(&e.range, &range)) {
            return Err(EditError::Overlap {
                first: existing.range.clone(),
                second: range,
            });
        }
        self.edits.push(PendingEdit {
            range,
            replacement: replacement.into(),
        });
        Ok(())
    }

    /// Stage removal of `range`.
    ///
    /// # Errors
    /// Returns `EditError::Overlap` when `range` intersects a staged edit.
    pub fn clear(&mut self, range: Range<usize>) -> Result<(), EditError> {
        self.replace(range, String::new())
    }

    /// Stage `text` in front of the byte at `at`.
    ///
    /// # Errors
    /// Returns `EditError::Overlap` when `at` falls inside a staged edit or
    /// another edit starts at the same offset.
    pub fn insert(&mut self, at: usize, text: impl Into<String>) -> Result<(), EditError> {
        self.replace(at..at, text)
    }

    /// Stage several edits as one unit: either all are staged or none.
    ///
    /// # Errors
    /// Returns `EditError::Overlap` when any edit intersects a staged edit or
    /// another edit of the same batch.
    pub fn stage(&mut self, batch: impl IntoIterator<Item = PendingEdit>) -> Result<(), EditError> {
        let batch: Vec<PendingEdit> = batch.into_iter().collect();
        for (index, edit) in batch.iter().enumerate() {
            let conflict = self
                .edits
                .iter()
                .chain(&batch[..index])
                .find(|e| overlaps(&e.range, &edit.range));
            if let Some(existing) = conflict {
                return Err(EditError::Overlap {
                    first: existing.range.clone(),
                    second: edit.range.clone(),
                });
            }
        }
        self.edits.extend(batch);
        Ok(())
    }

    /// Number of staged edits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edits.len()
    }

    /// Check if nothing is staged
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Staged edits in staging order.
    #[must_use]
    pub fn edits(&self) -> &[PendingEdit] {
        &self.edits
    }

    /// Apply every staged edit to `content`.
    ///
    /// # Errors
    /// Returns `EditError::OutOfBounds` when a range does not fit `content`.
    pub fn commit(self, content: &str) -> Result<EditResult, EditError> {
        if self.edits.is_empty() {
            return Ok(EditResult::unchanged(content));
        }

        let mut edits = self.edits;
        for edit in &edits {
            let range = &edit.range;
            if range.start > range.end
                || range.end > content.len()
                || !content.is_char_boundary(range.start)
                || !content.is_char_boundary(range.end)
            {
                return Err(EditError::OutOfBounds {
                    range: range.clone(),
                    len: content.len(),
                });
            }
        }

        // Sort by position in reverse order
        edits.sort_by(|a, b| b.range.start.cmp(&a.range.start));

        let mut modified = content.to_string();
        let mut locations = Vec::with_capacity(edits.len());

        for edit in &edits {
            let Range { start, end } = edit.range;
            let line = content[..start].matches('\n').count() + 1;
            let last_newline = content[..start].rfind('\n').map_or(0, |i| i + 1);
            let column = content[last_newline..start].chars().count() + 1;

            modified.replace_range(start..end, &edit.replacement);

            locations.push(EditLocation {
                line,
                column,
                original_text: content[start..end].to_string(),
                new_text: edit.replacement.clone(),
            });
        }

        locations.reverse();
        let diff = generate_unified_diff(content, &modified);
        tracing::debug!(edits = locations.len(), "changeset committed");

        Ok(EditResult {
            original: content.to_string(),
            modified,
            count: locations.len(),
            diff,
            edits: locations,
        })
    }

    /// Commit against `content` and write the result to `path`.
    ///
    /// The file is written only when `preview_only` is false and the commit
    /// changed the text.
    ///
    /// # Errors
    /// Returns `EditError::OutOfBounds` for invalid ranges and
    /// `EditError::Write` when the file cannot be written.
    pub fn commit_to_file<P: AsRef<Path>>(
        self,
        path: P,
        content: &str,
        preview_only: bool,
    ) -> Result<EditResult, EditError> {
        let path = path.as_ref();
        let result = self.commit(content)?;

        if !preview_only && result.is_changed() {
            std::fs::write(path, &result.modified).map_err(|source| EditError::Write {
                path: path.display().to_string(),
                source,
            })?;
        }

        Ok(result)
    }
}

fn overlaps(a: &Range<usize>, b: &Range<usize>) -> bool {
    (a.start < b.end && b.start < a.end) || a.start == b.start
}

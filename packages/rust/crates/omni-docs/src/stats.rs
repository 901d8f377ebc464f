//! Per-file counters and the end-of-run table.

use std::fmt::{self, Write as _};

use serde::Serialize;

use crate::llm::Usage;

/// Which pass produced a set of statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Insert comments where none exist.
    Missing,
    /// Refresh existing comments.
    Update,
}

impl Mode {
    /// Lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Missing => "missing",
            Mode::Update => "update",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one pass over one file.
#[derive(Debug, Clone, Serialize)]
pub struct FileStats {
    /// File path as displayed.
    pub file: String,
    /// Pass.
    pub mode: Mode,
    /// Generation usage.
    pub generation: Usage,
    /// Judge usage.
    pub judge: Usage,
    /// New comments staged.
    pub generated: usize,
    /// Existing comments rewritten.
    pub updated: usize,
    /// New comments vetoed by the judge.
    pub refused: usize,
    /// Updates vetoed by the judge as cosmetic.
    pub nits: usize,
    /// Updates the model declined or that changed nothing.
    pub skipped: usize,
    /// Declarations abandoned after a failed call or edit.
    pub failed: usize,
    /// Unified diff of the pass, kept in dry runs.
    #[serde(skip)]
    pub diff: Option<String>,
}

impl FileStats {
    /// Zeroed statistics.
    #[must_use]
    pub fn new(file: impl Into<String>, mode: Mode) -> Self {
        Self {
            file: file.into(),
            mode,
            generation: Usage::default(),
            judge: Usage::default(),
            generated: 0,
            updated: 0,
            refused: 0,
            nits: 0,
            skipped: 0,
            failed: 0,
            diff: None,
        }
    }

    /// Edits staged by this pass.
    #[must_use]
    pub fn edits(&self) -> usize {
        self.generated + self.updated
    }

    fn absorb(&mut self, other: &FileStats) {
        self.generation += other.generation;
        self.judge += other.judge;
        self.generated += other.generated;
        self.updated += other.updated;
        self.refused += other.refused;
        self.nits += other.nits;
        self.skipped += other.skipped;
        self.failed += other.failed;
    }

    fn cells(&self, mode: &str) -> [String; 12] {
        [
            self.file.clone(),
            mode.to_string(),
            self.generation.total_tokens.to_string(),
            format!("{:.4}", self.generation.cost),
            self.judge.total_tokens.to_string(),
            format!("{:.4}", self.judge.cost),
            self.generated.to_string(),
            self.updated.to_string(),
            self.refused.to_string(),
            self.nits.to_string(),
            self.skipped.to_string(),
            self.failed.to_string(),
        ]
    }
}

const HEADERS: [&str; 12] = [
    "file",
    "mode",
    "gen tokens",
    "gen cost",
    "judge tokens",
    "judge cost",
    "generated",
    "updated",
    "refused",
    "nits",
    "skipped",
    "failed",
];

/// Everything a run did.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    /// One entry per processed (file, pass).
    pub files: Vec<FileStats>,
    /// Files skipped because reading, parsing or writing them failed.
    pub failed_files: Vec<String>,
    /// A candidate declaration was left unprocessed for lack of edit budget.
    pub budget_exhausted: bool,
}

impl RunSummary {
    /// Edits committed across the run.
    #[must_use]
    pub fn total_edits(&self) -> usize {
        self.files.iter().map(FileStats::edits).sum()
    }

    /// Sum over every entry.
    #[must_use]
    pub fn totals(&self) -> FileStats {
        let mut total = FileStats::new("total", Mode::Missing);
        for stats in &self.files {
            total.absorb(stats);
        }
        total
    }

    /// Diffs collected in a dry run, in processing order.
    pub fn diffs(&self) -> impl Iterator<Item = &str> {
        self.files.iter().filter_map(|stats| stats.diff.as_deref())
    }

    /// Plain-text table with one row per entry and a totals row.
    #[must_use]
    pub fn render_table(&self) -> String {
        let mut rows: Vec<[String; 12]> = self
            .files
            .iter()
            .map(|stats| stats.cells(stats.mode.as_str()))
            .collect();
        rows.push(self.totals().cells(""));

        let mut widths = HEADERS.map(str::len);
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let mut out = String::new();
        push_row(&mut out, &HEADERS.map(str::to_string), &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        let _ = writeln!(out, "{}", rule.join("-+-"));
        for row in &rows {
            push_row(&mut out, row, &widths);
        }
        out
    }
}

fn push_row(out: &mut String, cells: &[String; 12], widths: &[usize; 12]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(column, (cell, width))| {
            if column < 2 {
                format!("{cell:<width$}")
            } else {
                format!("{cell:>width$}")
            }
        })
        .collect();
    let _ = writeln!(out, "{}", line.join(" | ").trim_end());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_has_totals() {
        let mut a = FileStats::new("src/a.ts", Mode::Missing);
        a.generated = 2;
        a.generation = Usage::priced(1000, 0.5);
        let mut b = FileStats::new("src/b.py", Mode::Update);
        b.updated = 1;
        b.nits = 3;
        let summary = RunSummary {
            files: vec![a, b],
            failed_files: Vec::new(),
            budget_exhausted: false,
        };

        assert_eq!(summary.total_edits(), 3);
        let table = summary.render_table();
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("file"));
        assert!(lines[2].contains("0.5000"));
        assert!(lines[3].starts_with("src/b.py | update"));
        assert!(lines[4].starts_with("total"));
    }
}

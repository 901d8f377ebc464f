//! Run-wide edit budget.

/// State shared by every file of one run.
///
/// Only committed edits count against the budget; a file's staged edits are
/// recorded once its changeset has been written (or diffed, in a dry run).
#[derive(Debug, Clone, Default)]
pub struct RunContext {
    max_edits: Option<usize>,
    edits: usize,
    budget_hit: bool,
}

impl RunContext {
    /// Context with the given budget; `None` is unlimited.
    #[must_use]
    pub fn new(max_edits: Option<usize>) -> Self {
        Self {
            max_edits,
            edits: 0,
            budget_hit: false,
        }
    }

    /// Edits committed so far.
    #[must_use]
    pub fn edits(&self) -> usize {
        self.edits
    }

    /// Edits still allowed, if bounded.
    #[must_use]
    pub fn remaining(&self) -> Option<usize> {
        self.max_edits.map(|max| max.saturating_sub(self.edits))
    }

    /// No further edit may be committed.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == Some(0)
    }

    /// Whether `staged` pending edits already use up what is left.
    #[must_use]
    pub fn allows(&self, staged: usize) -> bool {
        self.remaining().is_none_or(|left| staged < left)
    }

    /// Count the edits of one committed changeset.
    pub fn record_committed(&mut self, count: usize) {
        self.edits += count;
    }

    /// A candidate declaration was left unprocessed for lack of budget.
    pub fn mark_budget_hit(&mut self) {
        self.budget_hit = true;
    }

    /// Whether any candidate was skipped because the budget ran out.
    #[must_use]
    pub fn budget_hit(&self) -> bool {
        self.budget_hit
    }
}

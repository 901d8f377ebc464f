//! Judge labels and answer parsing.

/// One answer a judge may give.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    /// Label word the model must answer with.
    pub name: &'static str,
    /// What the label means.
    pub description: &'static str,
}

/// The labels of one judge question; exactly one of them lets an edit through.
#[derive(Debug, Clone)]
pub struct LabelSet {
    labels: Vec<Label>,
    accepting: &'static str,
}

impl LabelSet {
    /// Labels for reviewing a brand-new comment.
    #[must_use]
    pub fn review_new() -> Self {
        Self {
            labels: vec![
                Label {
                    name: "accept",
                    description: "the comment is accurate and useful for this declaration",
                },
                Label {
                    name: "reject",
                    description: "the comment is wrong, misleading, or adds nothing",
                },
            ],
            accepting: "accept",
        }
    }

    /// Labels for reviewing an updated comment.
    #[must_use]
    pub fn review_update() -> Self {
        Self {
            labels: vec![
                Label {
                    name: "apply",
                    description: "the new comment fixes real errors or omissions in the old one",
                },
                Label {
                    name: "nit",
                    description: "the differences are cosmetic; the old comment should stay",
                },
            ],
            accepting: "apply",
        }
    }

    /// All labels.
    #[must_use]
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// The label that lets an edit through.
    #[must_use]
    pub fn accepting(&self) -> &'static str {
        self.accepting
    }

    /// Whether `label` lets an edit through. No label never does.
    #[must_use]
    pub fn is_accepting(&self, label: Option<&str>) -> bool {
        label == Some(self.accepting)
    }

    /// The label whose last mention in `answer` comes last.
    ///
    /// Models tend to reason first and conclude last, so the final mention
    /// decides. Matching is case-insensitive.
    #[must_use]
    pub fn pick(&self, answer: &str) -> Option<&'static str> {
        let answer = answer.to_lowercase();
        self.labels
            .iter()
            .filter_map(|label| answer.rfind(label.name).map(|at| (at, label.name)))
            .max_by_key(|(at, _)| *at)
            .map(|(_, name)| name)
    }

    /// Answer instructions appended to a judge question.
    #[must_use]
    pub fn instructions(&self) -> String {
        let mut out = String::from("Answer with exactly one of these labels:\n");
        for label in &self.labels {
            out.push_str("- ");
            out.push_str(label.name);
            out.push_str(": ");
            out.push_str(label.description);
            out.push('\n');
        }
        out.push_str("Put the label alone on the last line.");
        out
    }
}

//! Prompt assembly with priority-aware token budgets.
//!
//! A prompt is a list of sections. Plain text and high-priority definitions
//! are always kept; low-priority definitions (typically the whole file) are
//! truncated, then dropped, until the rendered prompt fits the budget.

use crate::tokens::{count_tokens, truncate};

const TRUNCATION_MARKER: &str = "\n... [truncated]";
// Headroom for token merges across section joins.
const JOIN_SLACK: usize = 8;

/// How readily a section gives way to the token budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    /// Trimmed first.
    Low,
    /// Never trimmed.
    High,
}

#[derive(Debug, Clone)]
enum Section {
    Text(String),
    Def {
        name: String,
        body: String,
        fence: &'static str,
        priority: Priority,
    },
}

impl Section {
    fn render(&self) -> String {
        match self {
            Section::Text(text) => text.clone(),
            Section::Def {
                name, body, fence, ..
            } => render_def(name, body, fence),
        }
    }

    fn is_flexible(&self) -> bool {
        matches!(
            self,
            Section::Def {
                priority: Priority::Low,
                ..
            }
        )
    }
}

fn render_def(name: &str, body: &str, fence: &str) -> String {
    format!("{name}:\n```{fence}\n{body}\n```")
}

/// Builder for one model prompt.
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    sections: Vec<Section>,
}

impl PromptBuilder {
    /// Empty prompt.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an instruction paragraph.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.sections.push(Section::Text(text.into()));
        self
    }

    /// Append a named, fenced block of content.
    #[must_use]
    pub fn def(
        mut self,
        name: impl Into<String>,
        body: impl Into<String>,
        fence: &'static str,
        priority: Priority,
    ) -> Self {
        self.sections.push(Section::Def {
            name: name.into(),
            body: body.into(),
            fence,
            priority,
        });
        self
    }

    /// Render the prompt, trimming low-priority blocks to fit `max_tokens`.
    #[must_use]
    pub fn render(&self, max_tokens: Option<usize>) -> String {
        let full: Vec<String> = self.sections.iter().map(Section::render).collect();
        let joined = full.join("\n\n");
        let Some(max_tokens) = max_tokens else {
            return joined;
        };
        let total = count_tokens(&joined);
        if total <= max_tokens {
            return joined;
        }

        let fixed: usize = self
            .sections
            .iter()
            .zip(&full)
            .filter(|(section, _)| !section.is_flexible())
            .map(|(_, rendered)| count_tokens(rendered) + 1)
            .sum();
        let mut remaining = max_tokens.saturating_sub(fixed + JOIN_SLACK);
        let marker = count_tokens(TRUNCATION_MARKER);

        let mut parts = Vec::with_capacity(full.len());
        for (section, rendered) in self.sections.iter().zip(full) {
            let Section::Def {
                name,
                body,
                fence,
                priority: Priority::Low,
            } = section
            else {
                parts.push(rendered);
                continue;
            };
            let frame = count_tokens(&render_def(name, "", fence)) + 1;
            if remaining <= frame + marker {
                tracing::debug!(section = %name, "prompt section dropped for token budget");
                remaining = 0;
                continue;
            }
            let allowance = remaining - frame - marker;
            let mut kept = truncate(body, allowance);
            if kept.len() < body.len() {
                kept.push_str(TRUNCATION_MARKER);
            }
            remaining = remaining.saturating_sub(frame + count_tokens(&kept));
            parts.push(render_def(name, &kept, fence));
        }

        tracing::debug!(
            before = total,
            budget = max_tokens,
            "prompt trimmed to token budget"
        );
        parts.join("\n\n")
    }
}

//! Language adapters.
//!
//! A [`DocLanguage`] knows, for one family of grammars, which declarations
//! are commentable, where their comments live, where a new comment goes and
//! how free text becomes a comment in that language's syntax.
//!
//! ```text
//! languages/
//! ├── mod.rs         # DocLanguage trait, adapter selection, shared helpers
//! ├── typescript.rs  # TS/TSX/JS: JSDoc blocks
//! ├── python.rs      # Python: docstrings
//! └── csharp.rs      # C#: `///` XML doc lines
//! ```

mod csharp;
mod python;
mod typescript;

use once_cell::sync::Lazy;
use regex::Regex;

use omni_ast::{Lang, Rule, SgNode};

use crate::entity::{EntityKind, EntityKinds};
use crate::prompt::{Priority, PromptBuilder};

pub use csharp::CSharpDocs;
pub use python::PythonDocs;
pub use typescript::TypeScriptDocs;

/// Reply that tells the update pass to leave a comment alone.
pub const NO_CHANGE: &str = "NO_CHANGE";

/// Syntax kind of comment nodes in every supported grammar.
pub(crate) const COMMENT_KIND: &str = "comment";

/// What a prompt is about.
#[derive(Debug, Clone, Copy)]
pub struct PromptContext<'a> {
    /// Full text of the file.
    pub file_text: &'a str,
    /// Text of the matched declaration.
    pub declaration_text: &'a str,
    /// Human label from the declaration classifier (e.g. `method`).
    pub label: &'a str,
    /// Extra user instructions.
    pub instructions: Option<&'a str>,
}

/// Per-language declaration matching and comment rendering.
pub trait DocLanguage: Send + Sync {
    /// Adapter name for logs.
    fn name(&self) -> &'static str;

    /// Info string for fenced code blocks in prompts.
    fn fence(&self) -> &'static str;

    /// Language-specific comment conventions for the model.
    fn style_guide(&self) -> &'static str;

    /// Rule selecting commentable declarations of the requested kinds.
    ///
    /// With `with_existing_doc` the rule selects declarations that already
    /// carry a doc comment, otherwise those that lack one. For the same
    /// `kinds` and `exports_only` the two rules never select the same node
    /// and together select every candidate declaration.
    fn build_match_rule(
        &self,
        kinds: &EntityKinds,
        exports_only: bool,
        with_existing_doc: bool,
    ) -> Rule;

    /// Comment nodes currently documenting `declaration`, oldest first.
    fn find_existing_comment_nodes<'r>(&self, declaration: &SgNode<'r>) -> Vec<SgNode<'r>>;

    /// Node a new comment is placed in front of.
    fn find_insertion_point<'r>(&self, declaration: &SgNode<'r>) -> Option<SgNode<'r>>;

    /// Wrap model text in this language's comment syntax.
    ///
    /// Idempotent: rendering already-rendered text returns it unchanged.
    fn render_comment(&self, raw: &str) -> String;

    /// Prompt asking for a new comment.
    fn generate_prompt(&self, ctx: &PromptContext<'_>) -> PromptBuilder {
        let prompt = PromptBuilder::new()
            .def("FILE", ctx.file_text, self.fence(), Priority::Low)
            .def(
                "DECLARATION",
                ctx.declaration_text,
                self.fence(),
                Priority::High,
            )
            .text(format!(
                "Generate a documentation comment for the {} in DECLARATION. \
                 Use FILE only as context.",
                ctx.label
            ))
            .text(self.style_guide());
        with_instructions(prompt, ctx.instructions).text(
            "Respond with the comment text only. Do not repeat the declaration \
             and do not wrap the answer in a code block.",
        )
    }

    /// Prompt asking to refresh an existing comment.
    fn update_prompt(&self, ctx: &PromptContext<'_>, existing: &str) -> PromptBuilder {
        let prompt = PromptBuilder::new()
            .def("FILE", ctx.file_text, self.fence(), Priority::Low)
            .def(
                "DECLARATION",
                ctx.declaration_text,
                self.fence(),
                Priority::High,
            )
            .def("COMMENT", existing, self.fence(), Priority::High)
            .text(format!(
                "COMMENT documents the {} in DECLARATION. Update it so it matches \
                 the code. Fix wrong or missing information only; keep wording that \
                 is still accurate.",
                ctx.label
            ))
            .text(self.style_guide());
        with_instructions(prompt, ctx.instructions).text(format!(
            "If COMMENT is already accurate, respond with exactly {NO_CHANGE}. \
             Otherwise respond with the full updated comment only, without a \
             code block."
        ))
    }
}

fn with_instructions(prompt: PromptBuilder, instructions: Option<&str>) -> PromptBuilder {
    match instructions.map(str::trim).filter(|text| !text.is_empty()) {
        Some(text) => prompt.text(format!("Additional instructions:\n{text}")),
        None => prompt,
    }
}

static TYPESCRIPT: TypeScriptDocs = TypeScriptDocs;
static PYTHON: PythonDocs = PythonDocs;
static CSHARP: CSharpDocs = CSharpDocs;

/// Adapter for a grammar. Every JS/TS flavor shares the TypeScript adapter.
#[must_use]
pub fn adapter_for(lang: Lang) -> &'static dyn DocLanguage {
    match lang {
        Lang::Python => &PYTHON,
        Lang::CSharp => &CSHARP,
        Lang::TypeScript | Lang::Tsx | Lang::JavaScript => &TYPESCRIPT,
    }
}

/// Syntax kinds from `table` whose entity kind was requested.
pub(crate) fn requested_kinds(
    table: &[(&'static str, EntityKind)],
    wanted: &EntityKinds,
) -> Vec<&'static str> {
    table
        .iter()
        .filter(|(_, entity)| wanted.contains(entity))
        .map(|(kind, _)| *kind)
        .collect()
}

static FENCED: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"(?s)\A```[^\n]*\n(.*?)\n?```\z").ok());

/// Trim `raw` and drop a fenced code block around it, if any.
pub(crate) fn strip_code_fences(raw: &str) -> String {
    let trimmed = raw.trim();
    FENCED
        .as_ref()
        .and_then(|re| re.captures(trimmed))
        .and_then(|caps| caps.get(1))
        .map_or_else(|| trimmed.to_string(), |body| body.as_str().trim().to_string())
}

/// Contiguous comment siblings directly before `node` that satisfy
/// `accept`, oldest first. The walk stops at the first sibling that is not
/// an accepted comment.
pub(crate) fn preceding_comments<'r>(
    node: &SgNode<'r>,
    limit: Option<usize>,
    accept: impl Fn(&SgNode<'r>) -> bool,
) -> Vec<SgNode<'r>> {
    let mut found = Vec::new();
    let mut current = node.prev();
    while let Some(sibling) = current {
        if sibling.kind() != COMMENT_KIND
            || !accept(&sibling)
            || limit.is_some_and(|max| found.len() >= max)
        {
            break;
        }
        current = sibling.prev();
        found.push(sibling);
    }
    found.reverse();
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```ts\n/** Adds. */\n```"), "/** Adds. */");
        assert_eq!(strip_code_fences("```\nplain\n```\n"), "plain");
        assert_eq!(strip_code_fences("  no fence \n"), "no fence");
        assert_eq!(strip_code_fences("``` inline ```"), "``` inline ```");
    }

    #[test]
    fn test_adapter_selection() {
        assert_eq!(adapter_for(Lang::Python).name(), "python");
        assert_eq!(adapter_for(Lang::CSharp).name(), "csharp");
        assert_eq!(adapter_for(Lang::Tsx).name(), "typescript");
        assert_eq!(adapter_for(Lang::JavaScript).name(), "typescript");
    }

    #[test]
    fn test_update_prompt_mentions_escape_token() {
        let ctx = PromptContext {
            file_text: "def f():\n    \"\"\"Old.\"\"\"\n",
            declaration_text: "def f():\n    \"\"\"Old.\"\"\"",
            label: "function",
            instructions: Some("Use British spelling."),
        };
        let prompt = adapter_for(Lang::Python)
            .update_prompt(&ctx, "\"\"\"Old.\"\"\"")
            .render(None);
        assert!(prompt.contains("respond with exactly NO_CHANGE"));
        assert!(prompt.contains("COMMENT:\n```python\n\"\"\"Old.\"\"\""));
        assert!(prompt.contains("Use British spelling."));
    }
}

//! Command-line flags for the `omni-docs` binary.

use std::path::PathBuf;

use clap::Parser;

use omni_docs::{DocsConfig, EntityKind};

#[derive(Parser)]
#[command(name = "omni-docs")]
#[command(
    about = "Generate missing documentation comments and refresh stale ones (TS/JS, Python, C#)."
)]
pub(crate) struct Cli {
    /// Files or directories to process.
    #[arg(required_unless_present = "print_rule")]
    pub(crate) paths: Vec<PathBuf>,

    /// Only process files matching this glob (e.g. `src/**/*.ts`).
    #[arg(long)]
    pub(crate) glob: Option<String>,

    /// Run the missing-doc pass (default unless settings disable it).
    #[arg(long, overrides_with = "no_missing")]
    pub(crate) missing: bool,

    /// Skip the missing-doc pass.
    #[arg(long)]
    pub(crate) no_missing: bool,

    /// Run the update pass over existing comments.
    #[arg(long)]
    pub(crate) update: bool,

    /// Only exported (TS/JS) or public (C#) declarations.
    #[arg(long)]
    pub(crate) exports_only: bool,

    /// Comma-separated entity kinds (e.g. `function,class,method`).
    #[arg(long, value_delimiter = ',')]
    pub(crate) kinds: Vec<EntityKind>,

    /// Print diffs instead of writing files.
    #[arg(long)]
    pub(crate) dry_run: bool,

    /// Use placeholder text and an always-accepting judge; no API calls.
    #[arg(long)]
    pub(crate) mock: bool,

    /// Stage drafts without asking the judge.
    #[arg(long)]
    pub(crate) no_judge: bool,

    /// Global edit budget (0 = unlimited).
    #[arg(long)]
    pub(crate) max_edits: Option<usize>,

    /// Prompt token budget (0 = unlimited).
    #[arg(long)]
    pub(crate) max_context_tokens: Option<usize>,

    /// Extra instructions appended to every prompt.
    #[arg(long)]
    pub(crate) instructions: Option<String>,

    /// Generation model.
    #[arg(long)]
    pub(crate) model: Option<String>,

    /// Judge model (defaults to the generation model).
    #[arg(long)]
    pub(crate) judge_model: Option<String>,

    /// OpenAI-compatible API root.
    #[arg(long)]
    pub(crate) api_base: Option<String>,

    /// Override config directory.
    #[arg(long)]
    pub(crate) conf: Option<PathBuf>,

    /// Debug logging for omni-docs (RUST_LOG takes precedence).
    #[arg(long, short)]
    pub(crate) verbose: bool,

    /// Print the missing/update match rules for a language (`ts`, `py`, `cs`, ...) and exit.
    #[arg(long, value_name = "LANG")]
    pub(crate) print_rule: Option<String>,
}

impl Cli {
    /// Apply flags on top of settings-derived configuration.
    pub(crate) fn apply(&self, config: &mut DocsConfig) {
        if self.missing {
            config.missing = true;
        }
        if self.no_missing {
            config.missing = false;
        }
        if self.update {
            config.update = true;
        }
        if self.exports_only {
            config.exports_only = true;
        }
        if !self.kinds.is_empty() {
            config.entity_kinds = self.kinds.iter().copied().collect();
        }
        if self.dry_run {
            config.dry_run = true;
        }
        if self.mock {
            config.mock = true;
        }
        if self.no_judge {
            config.judge = false;
        }
        if let Some(max_edits) = self.max_edits {
            config.max_edits = omni_docs::config::unlimited_if_zero(max_edits);
        }
        if let Some(max_context_tokens) = self.max_context_tokens {
            config.max_context_tokens = omni_docs::config::unlimited_if_zero(max_context_tokens);
        }
        if let Some(instructions) = &self.instructions {
            config.instructions = Some(instructions.clone());
        }
        if let Some(model) = &self.model {
            if self.judge_model.is_none() && config.judge_model == config.model {
                config.judge_model.clone_from(model);
            }
            config.model.clone_from(model);
        }
        if let Some(judge_model) = &self.judge_model {
            config.judge_model.clone_from(judge_model);
        }
        if let Some(api_base) = &self.api_base {
            config.api_base.clone_from(api_base);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_settings() {
        let cli = Cli::parse_from([
            "omni-docs",
            "src",
            "--update",
            "--no-missing",
            "--kinds",
            "function,class",
            "--max-edits",
            "0",
            "--model",
            "local-coder",
        ]);
        let mut config = DocsConfig::default();
        cli.apply(&mut config);

        assert!(config.update);
        assert!(!config.missing);
        assert_eq!(config.entity_kinds.len(), 2);
        assert_eq!(config.max_edits, None);
        assert_eq!(config.model, "local-coder");
        assert_eq!(config.judge_model, "local-coder");
    }

    #[test]
    fn test_print_rule_needs_no_paths() {
        let cli = Cli::try_parse_from(["omni-docs", "--print-rule", "py"]).unwrap();
        assert_eq!(cli.print_rule.as_deref(), Some("py"));
        assert!(Cli::try_parse_from(["omni-docs"]).is_err());
    }
}

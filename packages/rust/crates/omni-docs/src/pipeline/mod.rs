//! Per-file documentation passes: plan -> generate -> synthesize -> judge -> stage -> commit.

mod context;
mod plan;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use omni_ast::{Lang, SourceTree};
use omni_edit::{Changeset, PendingEdit, generate_file_diff};

use crate::config::DocsConfig;
use crate::error::DocsError;
use crate::files::read_source;
use crate::languages::{DocLanguage, NO_CHANGE, PromptContext, adapter_for};
use crate::llm::{
    ChatClient, ChatGenerator, ChatJudge, GenerationRequest, Generator, Judge, LabelSet,
    MockGenerator, MockJudge,
};
use crate::prompt::PromptBuilder;
use crate::review::{judge_generate_prompt, judge_update_prompt};
use crate::stats::{FileStats, Mode, RunSummary};
use crate::synthesize::synthesize;

pub use context::RunContext;
pub use plan::{PlannedDeclaration, plan_declarations};

const SYSTEM_PROMPT: &str = "You are an expert software engineer writing documentation \
                             comments for source code. Be accurate and concise.";

/// Documentation pipeline: config plus the two model ports.
pub struct DocPipeline {
    config: DocsConfig,
    generator: Box<dyn Generator>,
    judge: Box<dyn Judge>,
}

impl DocPipeline {
    /// Pipeline over explicit ports.
    #[must_use]
    pub fn new(config: DocsConfig, generator: Box<dyn Generator>, judge: Box<dyn Judge>) -> Self {
        Self {
            config,
            generator,
            judge,
        }
    }

    /// Pipeline with mock ports in mock mode, chat-completion ports otherwise.
    #[must_use]
    pub fn from_config(config: DocsConfig) -> Self {
        if config.mock {
            tracing::info!("mock mode: no model calls are made");
            return Self::new(
                config,
                Box::new(MockGenerator::default()),
                Box::new(MockJudge),
            );
        }

        let api_key = config.api_key();
        if api_key.is_none() {
            tracing::warn!(
                env = %config.api_key_env,
                "no API key set; requests are sent unauthenticated"
            );
        }
        let client = Arc::new(ChatClient::new(&config.api_base, api_key));
        let generator = ChatGenerator::new(Arc::clone(&client), config.cost_per_1k_tokens);
        let judge = ChatJudge::new(client, config.judge_model.clone(), config.cost_per_1k_tokens);
        Self::new(config, Box::new(generator), Box::new(judge))
    }

    /// Configuration in effect.
    #[must_use]
    pub fn config(&self) -> &DocsConfig {
        &self.config
    }

    /// Run the enabled passes over `files`, update before missing per file.
    ///
    /// Per-file failures are logged, listed in the summary and the file is
    /// skipped.
    ///
    /// # Errors
    /// Returns `DocsError::NoFiles` for an empty list and `DocsError::NoMode`
    /// when both passes are disabled.
    pub async fn run(&self, files: &[PathBuf]) -> Result<RunSummary, DocsError> {
        if files.is_empty() {
            return Err(DocsError::NoFiles);
        }
        self.config.validate()?;

        let modes: Vec<Mode> = [
            (self.config.update, Mode::Update),
            (self.config.missing, Mode::Missing),
        ]
        .into_iter()
        .filter_map(|(enabled, mode)| enabled.then_some(mode))
        .collect();
        let jobs: Vec<(&Path, Mode)> = files
            .iter()
            .flat_map(|path| modes.iter().map(move |&mode| (path.as_path(), mode)))
            .collect();

        let mut ctx = RunContext::new(self.config.max_edits);
        let mut summary = RunSummary::default();
        let mut failed: Option<&Path> = None;
        for (index, &(path, mode)) in jobs.iter().enumerate() {
            if failed == Some(path) {
                continue;
            }
            if ctx.is_exhausted() {
                if jobs[index..]
                    .iter()
                    .any(|&(path, mode)| self.has_candidates(path, mode))
                {
                    ctx.mark_budget_hit();
                }
                tracing::info!(edits = ctx.edits(), "edit budget exhausted; stopping run");
                break;
            }
            match self.process_file(path, mode, &mut ctx).await {
                Ok(stats) => summary.files.push(stats),
                Err(error) => {
                    tracing::warn!(
                        path = %path.display(),
                        mode = %mode,
                        error = %error,
                        "file skipped"
                    );
                    summary.failed_files.push(path.display().to_string());
                    failed = Some(path);
                }
            }
        }
        summary.budget_exhausted = ctx.budget_hit();
        tracing::info!(
            files = files.len(),
            edits = summary.total_edits(),
            failed = summary.failed_files.len(),
            "run complete"
        );
        Ok(summary)
    }

    /// Insert comments on undocumented declarations of one file.
    ///
    /// # Errors
    /// Returns read, parse-selection and write errors for the file.
    pub async fn add_missing_docs(
        &self,
        path: &Path,
        ctx: &mut RunContext,
    ) -> Result<FileStats, DocsError> {
        self.process_file(path, Mode::Missing, ctx).await
    }

    /// Refresh existing comments of one file.
    ///
    /// # Errors
    /// Returns read, parse-selection and write errors for the file.
    pub async fn update_docs(
        &self,
        path: &Path,
        ctx: &mut RunContext,
    ) -> Result<FileStats, DocsError> {
        self.process_file(path, Mode::Update, ctx).await
    }

    /// Read, parse and plan one file for `mode`.
    fn plan_file(
        &self,
        path: &Path,
        mode: Mode,
    ) -> Result<(&'static dyn DocLanguage, String, Vec<PlannedDeclaration>), DocsError> {
        let lang = Lang::from_path(path)
            .ok_or_else(|| DocsError::UnsupportedFile(path.display().to_string()))?;
        let adapter = adapter_for(lang);
        let source = read_source(path, self.config.max_file_size)?;
        let rule = adapter.build_match_rule(
            &self.config.entity_kinds,
            self.config.exports_only,
            mode == Mode::Update,
        );
        let planned = {
            let tree = SourceTree::parse(lang, source.as_str());
            plan_declarations(adapter, &tree, &rule, mode)?
        };
        Ok((adapter, source, planned))
    }

    /// Whether `path` has declarations `mode` would work on. No model calls.
    fn has_candidates(&self, path: &Path, mode: Mode) -> bool {
        self.plan_file(path, mode)
            .is_ok_and(|(_, _, planned)| !planned.is_empty())
    }

    async fn process_file(
        &self,
        path: &Path,
        mode: Mode,
        ctx: &mut RunContext,
    ) -> Result<FileStats, DocsError> {
        let (adapter, source, planned) = self.plan_file(path, mode)?;
        let file = path.display().to_string();
        tracing::info!(
            file = %file,
            mode = %mode,
            adapter = adapter.name(),
            declarations = planned.len(),
            "processing file"
        );

        let mut stats = FileStats::new(file.clone(), mode);
        let mut changes = Changeset::new();
        let mut staged = 0;
        for item in &planned {
            if !ctx.allows(staged) {
                tracing::info!(file = %file, "edit budget exhausted; stopping file");
                ctx.mark_budget_hit();
                break;
            }
            let accepted = match mode {
                Mode::Missing => {
                    self.document(adapter, &source, item, &mut stats, &mut changes)
                        .await
                }
                Mode::Update => {
                    self.refresh(adapter, &source, item, &mut stats, &mut changes)
                        .await
                }
            };
            if accepted {
                staged += 1;
            }
        }

        if changes.is_empty() {
            return Ok(stats);
        }
        let result = changes.commit_to_file(path, &source, self.config.dry_run)?;
        ctx.record_committed(staged);
        tracing::debug!("{}", result.format(Some(&file)));
        if self.config.dry_run {
            stats.diff = Some(generate_file_diff(&file, &result.original, &result.modified));
        } else {
            tracing::info!(file = %file, edits = result.count, "file updated");
        }
        Ok(stats)
    }

    /// Missing pass for one declaration. Returns whether an edit was staged.
    async fn document(
        &self,
        adapter: &dyn DocLanguage,
        source: &str,
        item: &PlannedDeclaration,
        stats: &mut FileStats,
        changes: &mut Changeset,
    ) -> bool {
        let prompt = adapter.generate_prompt(&self.prompt_context(source, item));
        let Some(reply) = self.generate(prompt, stats).await else {
            return false;
        };
        let comment = synthesize(adapter, &reply, &item.anchor);

        if self.config.judge {
            let question = judge_generate_prompt(adapter.fence(), &item.matched.text, comment.text());
            match self.review(question, &LabelSet::review_new(), stats).await {
                Some(true) => {}
                Some(false) => {
                    tracing::debug!(line = item.declaration.line, "judge refused new comment");
                    stats.refused += 1;
                    return false;
                }
                None => return false,
            }
        }

        match changes.insert(item.anchor.start, comment.as_prefix()) {
            Ok(()) => {
                stats.generated += 1;
                true
            }
            Err(error) => {
                tracing::warn!(line = item.declaration.line, error = %error, "edit rejected");
                stats.failed += 1;
                false
            }
        }
    }

    /// Update pass for one declaration. Returns whether an edit was staged.
    async fn refresh(
        &self,
        adapter: &dyn DocLanguage,
        source: &str,
        item: &PlannedDeclaration,
        stats: &mut FileStats,
        changes: &mut Changeset,
    ) -> bool {
        let existing = item
            .comments
            .iter()
            .map(|comment| comment.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        let prompt = adapter.update_prompt(&self.prompt_context(source, item), &existing);
        let Some(reply) = self.generate(prompt, stats).await else {
            return false;
        };
        if reply.contains(NO_CHANGE) {
            tracing::debug!(line = item.declaration.line, "comment already accurate");
            stats.skipped += 1;
            return false;
        }

        let comment = synthesize(adapter, &reply, &item.anchor);
        if item.comments.len() == 1 && comment.text() == item.anchor.text {
            stats.skipped += 1;
            return false;
        }

        if self.config.judge {
            let question = judge_update_prompt(
                adapter.fence(),
                &item.matched.text,
                &existing,
                comment.text(),
            );
            match self.review(question, &LabelSet::review_update(), stats).await {
                Some(true) => {}
                Some(false) => {
                    tracing::debug!(line = item.declaration.line, "judge marked update as nit");
                    stats.nits += 1;
                    return false;
                }
                None => return false,
            }
        }

        let mut batch = vec![PendingEdit {
            range: item.anchor.range(),
            replacement: comment.text().to_string(),
        }];
        batch.extend(item.comments.windows(2).map(|pair| PendingEdit {
            range: pair[0].end..pair[1].end,
            replacement: String::new(),
        }));
        match changes.stage(batch) {
            Ok(()) => {
                stats.updated += 1;
                true
            }
            Err(error) => {
                tracing::warn!(line = item.declaration.line, error = %error, "edit rejected");
                stats.failed += 1;
                false
            }
        }
    }

    fn prompt_context<'a>(&'a self, source: &'a str, item: &'a PlannedDeclaration) -> PromptContext<'a> {
        PromptContext {
            file_text: source,
            declaration_text: &item.matched.text,
            label: item.label,
            instructions: self.config.instructions.as_deref(),
        }
    }

    async fn generate(&self, prompt: PromptBuilder, stats: &mut FileStats) -> Option<String> {
        let request = GenerationRequest {
            prompt,
            system: Some(SYSTEM_PROMPT.to_string()),
            model: self.config.model.clone(),
            temperature: self.config.temperature,
            max_context_tokens: self.config.max_context_tokens,
        };
        match self.generator.generate(&request).await {
            Ok(generation) => {
                stats.generation += generation.usage;
                if generation.text.trim().is_empty() {
                    tracing::warn!("model returned an empty comment; skipping declaration");
                    stats.failed += 1;
                    return None;
                }
                Some(generation.text)
            }
            Err(error) => {
                tracing::warn!(error = %error, "generation failed; skipping declaration");
                stats.failed += 1;
                None
            }
        }
    }

    /// `Some(accepted)`, or `None` when the judge call failed.
    async fn review(
        &self,
        question: PromptBuilder,
        labels: &LabelSet,
        stats: &mut FileStats,
    ) -> Option<bool> {
        let prompt = question.render(self.config.max_context_tokens);
        match self.judge.classify(&prompt, labels).await {
            Ok(classification) => {
                stats.judge += classification.usage;
                tracing::trace!(answer = %classification.answer, "judge answer");
                Some(labels.is_accepting(classification.label.as_deref()))
            }
            Err(error) => {
                tracing::warn!(error = %error, "judge call failed; skipping declaration");
                stats.failed += 1;
                None
            }
        }
    }
}

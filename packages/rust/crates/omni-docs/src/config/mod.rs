//! Run configuration.
//!
//! `settings` reads the layered YAML files; [`DocsConfig`] is the resolved,
//! fully-defaulted view the pipeline runs with. The binary applies CLI flags
//! on top of it.

mod settings;

pub use settings::{
    DocsSettings, LlmSettings, RunSettings, load_settings, load_settings_from_paths,
    set_config_home_override, settings_paths,
};

use crate::entity::{EntityKinds, all_entity_kinds};
use crate::error::DocsError;

/// Default generation and judge model.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// Default API root.
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
/// Default API key variable.
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";
/// Default global edit budget.
pub const DEFAULT_MAX_EDITS: usize = 50;
/// Default prompt token budget.
pub const DEFAULT_MAX_CONTEXT_TOKENS: usize = 12_000;
/// Default size limit for source files (1 MiB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1024 * 1024;

/// Resolved configuration of one run.
#[derive(Debug, Clone)]
pub struct DocsConfig {
    /// Declaration categories to document.
    pub entity_kinds: EntityKinds,
    /// Only exported/public declarations.
    pub exports_only: bool,
    /// Preview diffs instead of writing files.
    pub dry_run: bool,
    /// Use offline ports instead of the API.
    pub mock: bool,
    /// Review drafts with the judge.
    pub judge: bool,
    /// Global edit budget; `None` is unlimited.
    pub max_edits: Option<usize>,
    /// Prompt token budget; `None` is unlimited.
    pub max_context_tokens: Option<usize>,
    /// Extra instructions appended to every prompt.
    pub instructions: Option<String>,
    /// Run the missing-doc pass.
    pub missing: bool,
    /// Run the update pass.
    pub update: bool,
    /// Generation model.
    pub model: String,
    /// Judge model.
    pub judge_model: String,
    /// API root.
    pub api_base: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// Generation temperature.
    pub temperature: Option<f32>,
    /// Price per 1000 tokens.
    pub cost_per_1k_tokens: f64,
    /// Files above this size are skipped.
    pub max_file_size: u64,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self::from_settings(DocsSettings::default())
    }
}

impl DocsConfig {
    /// Fill unset settings with defaults.
    #[must_use]
    pub fn from_settings(settings: DocsSettings) -> Self {
        let DocsSettings { llm, docs } = settings;
        let model = llm.model.unwrap_or_else(|| DEFAULT_MODEL.to_string());
        Self {
            entity_kinds: docs
                .entity_kinds
                .filter(|kinds| !kinds.is_empty())
                .map_or_else(all_entity_kinds, |kinds| kinds.into_iter().collect()),
            exports_only: docs.exports_only.unwrap_or(false),
            dry_run: docs.dry_run.unwrap_or(false),
            mock: docs.mock.unwrap_or(false),
            judge: docs.judge.unwrap_or(true),
            max_edits: unlimited_if_zero(docs.max_edits.unwrap_or(DEFAULT_MAX_EDITS)),
            max_context_tokens: unlimited_if_zero(
                docs.max_context_tokens
                    .unwrap_or(DEFAULT_MAX_CONTEXT_TOKENS),
            ),
            instructions: docs.instructions.filter(|text| !text.trim().is_empty()),
            missing: docs.missing.unwrap_or(true),
            update: docs.update.unwrap_or(false),
            judge_model: llm.judge_model.unwrap_or_else(|| model.clone()),
            model,
            api_base: llm
                .api_base
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            api_key_env: llm
                .api_key_env
                .unwrap_or_else(|| DEFAULT_API_KEY_ENV.to_string()),
            temperature: llm.temperature.or(Some(0.2)),
            cost_per_1k_tokens: llm.cost_per_1k_tokens.unwrap_or(0.0),
            max_file_size: docs.max_file_size.unwrap_or(DEFAULT_MAX_FILE_SIZE),
        }
    }

    /// Reject configurations that cannot do anything.
    ///
    /// # Errors
    /// Returns `DocsError::NoMode` when both passes are disabled.
    pub fn validate(&self) -> Result<(), DocsError> {
        if !self.missing && !self.update {
            return Err(DocsError::NoMode);
        }
        Ok(())
    }

    /// API key from the configured environment variable.
    #[must_use]
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

/// `0` means no limit.
#[must_use]
pub fn unlimited_if_zero(value: usize) -> Option<usize> {
    (value > 0).then_some(value)
}

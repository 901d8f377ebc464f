//! Settings loader for omni-docs.
//!
//! Loads and merges:
//! - System defaults: `<PRJ_ROOT>/packages/conf/docs.yaml`
//! - User overrides:  `<PRJ_CONFIG_HOME>/omni-docs/settings.yaml`
//!
//! Merge precedence is user over system. Missing files are silent; unreadable
//! or invalid files are logged and ignored.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::Deserialize;

use crate::entity::EntityKind;

const DEFAULT_SYSTEM_SETTINGS_RELATIVE_PATH: &str = "packages/conf/docs.yaml";
const DEFAULT_USER_SETTINGS_RELATIVE_PATH: &str = "omni-docs/settings.yaml";
const DEFAULT_CONFIG_HOME_RELATIVE_PATH: &str = ".config";
static CONFIG_HOME_OVERRIDE: OnceLock<PathBuf> = OnceLock::new();

/// Raw settings file contents. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocsSettings {
    /// Model endpoint and pricing.
    #[serde(default)]
    pub llm: LlmSettings,
    /// What a run documents and how far it goes.
    #[serde(default)]
    pub docs: RunSettings,
}

/// `llm:` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LlmSettings {
    /// Generation model.
    pub model: Option<String>,
    /// Judge model; defaults to `model`.
    pub judge_model: Option<String>,
    /// API root, e.g. `https://api.openai.com/v1`.
    pub api_base: Option<String>,
    /// Environment variable holding the API key.
    pub api_key_env: Option<String>,
    /// Generation temperature.
    pub temperature: Option<f32>,
    /// Price per 1000 tokens, for the cost columns.
    pub cost_per_1k_tokens: Option<f64>,
}

/// `docs:` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RunSettings {
    /// Declaration categories to document.
    pub entity_kinds: Option<Vec<EntityKind>>,
    /// Only exported/public declarations.
    pub exports_only: Option<bool>,
    /// Review drafts with the judge model.
    pub judge: Option<bool>,
    /// Global edit budget; 0 means unlimited.
    pub max_edits: Option<usize>,
    /// Prompt token budget; 0 means unlimited.
    pub max_context_tokens: Option<usize>,
    /// Extra instructions appended to every prompt.
    pub instructions: Option<String>,
    /// Files above this size are skipped.
    pub max_file_size: Option<u64>,
    /// Run the missing-doc pass.
    pub missing: Option<bool>,
    /// Run the update pass.
    pub update: Option<bool>,
    /// Preview diffs instead of writing.
    pub dry_run: Option<bool>,
    /// Use offline ports.
    pub mock: Option<bool>,
}

impl DocsSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            llm: self.llm.merge(overlay.llm),
            docs: self.docs.merge(overlay.docs),
        }
    }
}

impl LlmSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            model: overlay.model.or(self.model),
            judge_model: overlay.judge_model.or(self.judge_model),
            api_base: overlay.api_base.or(self.api_base),
            api_key_env: overlay.api_key_env.or(self.api_key_env),
            temperature: overlay.temperature.or(self.temperature),
            cost_per_1k_tokens: overlay.cost_per_1k_tokens.or(self.cost_per_1k_tokens),
        }
    }
}

impl RunSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            entity_kinds: overlay.entity_kinds.or(self.entity_kinds),
            exports_only: overlay.exports_only.or(self.exports_only),
            judge: overlay.judge.or(self.judge),
            max_edits: overlay.max_edits.or(self.max_edits),
            max_context_tokens: overlay.max_context_tokens.or(self.max_context_tokens),
            instructions: overlay.instructions.or(self.instructions),
            max_file_size: overlay.max_file_size.or(self.max_file_size),
            missing: overlay.missing.or(self.missing),
            update: overlay.update.or(self.update),
            dry_run: overlay.dry_run.or(self.dry_run),
            mock: overlay.mock.or(self.mock),
        }
    }
}

/// Load merged settings from the system and user files.
#[must_use]
pub fn load_settings() -> DocsSettings {
    let (system_path, user_path) = settings_paths();
    load_settings_from_paths(&system_path, &user_path)
}

#[doc(hidden)]
#[must_use]
pub fn settings_paths() -> (PathBuf, PathBuf) {
    let root = project_root();
    let system_path = root.join(DEFAULT_SYSTEM_SETTINGS_RELATIVE_PATH);
    let user_path = resolve_config_home(&root).join(DEFAULT_USER_SETTINGS_RELATIVE_PATH);
    (system_path, user_path)
}

#[doc(hidden)]
#[must_use]
pub fn load_settings_from_paths(system: &Path, user: &Path) -> DocsSettings {
    load_one(system).merge(load_one(user))
}

fn load_one(path: &Path) -> DocsSettings {
    if !path.exists() {
        return DocsSettings::default();
    }
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) => {
            tracing::warn!(
                path = %path.display(),
                error = %error,
                "failed to read settings file; ignoring"
            );
            return DocsSettings::default();
        }
    };
    match serde_yaml::from_str::<Option<DocsSettings>>(&raw) {
        Ok(value) => {
            tracing::debug!(path = %path.display(), "settings loaded");
            value.unwrap_or_default()
        }
        Err(error) => {
            tracing::warn!(
                path = %path.display(),
                error = %error,
                "failed to parse settings yaml; ignoring file"
            );
            DocsSettings::default()
        }
    }
}

fn project_root() -> PathBuf {
    std::env::var("PRJ_ROOT")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Set config-home override (used by CLI `--conf`).
///
/// The path can be absolute, or relative to `PRJ_ROOT`/cwd.
pub fn set_config_home_override(path: impl Into<PathBuf>) {
    let path = path.into();
    if path.as_os_str().is_empty() {
        return;
    }
    if CONFIG_HOME_OVERRIDE.set(path.clone()).is_err()
        && let Some(current) = CONFIG_HOME_OVERRIDE.get()
        && current != &path
    {
        tracing::warn!(
            current = %current.display(),
            ignored = %path.display(),
            "config home override already set; ignoring subsequent value"
        );
    }
}

fn resolve_config_home(project_root: &Path) -> PathBuf {
    if let Some(path) = CONFIG_HOME_OVERRIDE.get() {
        return absolutize(project_root, path.clone());
    }

    let configured = std::env::var("PRJ_CONFIG_HOME")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_CONFIG_HOME_RELATIVE_PATH.to_string());
    absolutize(project_root, PathBuf::from(configured))
}

fn absolutize(project_root: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        project_root.join(path)
    }
}

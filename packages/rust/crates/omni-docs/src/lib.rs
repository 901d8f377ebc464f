//! omni-docs - Documentation comments drafted by a model, reviewed by a model
//!
//! Finds undocumented (or documented) declarations in TypeScript/JavaScript,
//! Python and C# files, asks a generator for comment text, renders it in the
//! language's comment syntax, lets a judge veto it and stages the accepted
//! comments as non-overlapping edits committed once per file.
//!
//! ## Architecture
//!
//! ```text
//! omni-docs/src/
//! ├── lib.rs         # Re-exports (entry point)
//! ├── main.rs        # CLI binary
//! ├── cli.rs         # clap arguments
//! ├── config/        # DocsConfig + layered YAML settings
//! ├── error.rs       # DocsError, LlmError (thiserror)
//! ├── entity.rs      # EntityKind filter
//! ├── files.rs       # Discovery, size and binary guards
//! ├── languages/     # DocLanguage adapters (TS/JS, Python, C#)
//! ├── classify.rs    # Declaration labels for prompts
//! ├── prompt.rs      # Prompt sections under a token budget
//! ├── tokens.rs      # tiktoken counting and truncation
//! ├── synthesize.rs  # Rendered comment aligned to its anchor
//! ├── review.rs      # Judge questions
//! ├── llm/           # Generator/Judge ports: chat API and mock
//! ├── stats.rs       # FileStats, RunSummary table
//! └── pipeline/      # DocPipeline, RunContext, planning
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use omni_docs::{DocPipeline, DocsConfig, discover_files};
//!
//! # async fn demo() -> Result<(), omni_docs::DocsError> {
//! let config = DocsConfig { mock: true, dry_run: true, ..DocsConfig::default() };
//! let files = discover_files(&["src".into()], None)?;
//! let summary = DocPipeline::from_config(config).run(&files).await?;
//! println!("{}", summary.render_table());
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

pub mod classify;
pub mod config;
mod entity;
mod error;
mod files;
pub mod languages;
pub mod llm;
mod pipeline;
mod prompt;
pub mod review;
mod stats;
pub mod synthesize;
pub mod tokens;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::{DocsConfig, DocsSettings, load_settings, set_config_home_override};
pub use entity::{EntityKind, EntityKinds, all_entity_kinds};
pub use error::{DocsError, LlmError};
pub use files::{SKIP_DIRS, discover_files, is_binary, read_source};
pub use languages::{DocLanguage, NO_CHANGE, PromptContext, adapter_for};
pub use pipeline::{DocPipeline, PlannedDeclaration, RunContext, plan_declarations};
pub use prompt::{Priority, PromptBuilder};
pub use stats::{FileStats, Mode, RunSummary};
pub use synthesize::{SynthesizedComment, synthesize};

//! Generation and judge ports.
//!
//! The pipeline talks to models only through [`Generator`] and [`Judge`].
//! `client`/`chat` implement them over an OpenAI-compatible endpoint;
//! `mock` implements them offline for dry runs and tests.

mod chat;
mod client;
mod labels;
mod mock;

use std::ops::AddAssign;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::LlmError;
use crate::prompt::PromptBuilder;

pub use chat::{ChatGenerator, ChatJudge};
pub use client::{ChatClient, ChatMessage, Completion};
pub use labels::{Label, LabelSet};
pub use mock::{MOCK_DOC_TEXT, MockGenerator, MockJudge};

/// Token usage and cost of one or more calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Usage {
    /// Prompt plus completion tokens.
    pub total_tokens: u64,
    /// Cost in the configured currency.
    pub cost: f64,
}

impl Usage {
    /// Usage for `total_tokens` at `cost_per_1k_tokens`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn priced(total_tokens: u64, cost_per_1k_tokens: f64) -> Self {
        Self {
            total_tokens,
            cost: total_tokens as f64 / 1000.0 * cost_per_1k_tokens,
        }
    }
}

impl AddAssign for Usage {
    fn add_assign(&mut self, other: Self) {
        self.total_tokens += other.total_tokens;
        self.cost += other.cost;
    }
}

/// One request for a documentation draft.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Prompt sections, rendered against `max_context_tokens`.
    pub prompt: PromptBuilder,
    /// Optional system message.
    pub system: Option<String>,
    /// Model name.
    pub model: String,
    /// Sampling temperature.
    pub temperature: Option<f32>,
    /// Token budget for the rendered prompt.
    pub max_context_tokens: Option<usize>,
}

impl GenerationRequest {
    /// Prompt text within the token budget.
    #[must_use]
    pub fn render_prompt(&self) -> String {
        self.prompt.render(self.max_context_tokens)
    }
}

/// A model reply.
#[derive(Debug, Clone)]
pub struct Generation {
    /// Reply text.
    pub text: String,
    /// What the call cost.
    pub usage: Usage,
}

/// Outcome of a judge call.
#[derive(Debug, Clone)]
pub struct Classification {
    /// Recognized label, if any.
    pub label: Option<String>,
    /// Raw answer.
    pub answer: String,
    /// What the call cost.
    pub usage: Usage,
}

/// Drafts documentation text.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Run one generation. Errors are the only failure signal.
    async fn generate(&self, request: &GenerationRequest) -> Result<Generation, LlmError>;
}

/// Classifies a draft into one of a fixed set of labels.
#[async_trait]
pub trait Judge: Send + Sync {
    /// Ask `prompt` and map the answer onto `labels`.
    async fn classify(&self, prompt: &str, labels: &LabelSet)
    -> Result<Classification, LlmError>;
}

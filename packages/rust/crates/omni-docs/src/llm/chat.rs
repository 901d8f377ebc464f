//! Ports over [`ChatClient`].

use std::sync::Arc;

use async_trait::async_trait;

use super::client::{ChatClient, ChatMessage};
use super::{Classification, Generation, GenerationRequest, Generator, Judge, LabelSet, Usage};
use crate::error::LlmError;

/// Generator backed by a chat completion endpoint.
#[derive(Debug, Clone)]
pub struct ChatGenerator {
    client: Arc<ChatClient>,
    cost_per_1k_tokens: f64,
}

impl ChatGenerator {
    /// Create a generator that prices usage at `cost_per_1k_tokens`.
    #[must_use]
    pub fn new(client: Arc<ChatClient>, cost_per_1k_tokens: f64) -> Self {
        Self {
            client,
            cost_per_1k_tokens,
        }
    }
}

#[async_trait]
impl Generator for ChatGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<Generation, LlmError> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &request.system {
            messages.push(ChatMessage::system(system.clone()));
        }
        messages.push(ChatMessage::user(request.render_prompt()));

        let completion = self
            .client
            .complete(&request.model, &messages, request.temperature)
            .await?;
        Ok(Generation {
            text: completion.content,
            usage: Usage::priced(completion.total_tokens, self.cost_per_1k_tokens),
        })
    }
}

/// Judge backed by a chat completion endpoint.
#[derive(Debug, Clone)]
pub struct ChatJudge {
    client: Arc<ChatClient>,
    model: String,
    cost_per_1k_tokens: f64,
}

impl ChatJudge {
    /// Create a judge asking `model`.
    #[must_use]
    pub fn new(client: Arc<ChatClient>, model: impl Into<String>, cost_per_1k_tokens: f64) -> Self {
        Self {
            client,
            model: model.into(),
            cost_per_1k_tokens,
        }
    }
}

#[async_trait]
impl Judge for ChatJudge {
    async fn classify(
        &self,
        prompt: &str,
        labels: &LabelSet,
    ) -> Result<Classification, LlmError> {
        let messages = [
            ChatMessage::system(
                "You review documentation comments for source code. Be strict: \
                 reject comments that are inaccurate or merely restate the name.",
            ),
            ChatMessage::user(format!("{prompt}\n\n{}", labels.instructions())),
        ];
        let completion = self.client.complete(&self.model, &messages, Some(0.0)).await?;
        let label = labels.pick(&completion.content).map(str::to_string);
        tracing::debug!(label = ?label, "judge answered");
        Ok(Classification {
            label,
            answer: completion.content,
            usage: Usage::priced(completion.total_tokens, self.cost_per_1k_tokens),
        })
    }
}

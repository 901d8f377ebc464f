//! Offline ports for `--mock` runs and tests.

use async_trait::async_trait;

use super::{Classification, Generation, GenerationRequest, Generator, Judge, LabelSet, Usage};
use crate::error::LlmError;

/// Placeholder text produced by [`MockGenerator`].
pub const MOCK_DOC_TEXT: &str = "Placeholder documentation generated in mock mode.";

/// Generator that always replies with fixed text.
#[derive(Debug, Clone)]
pub struct MockGenerator {
    text: String,
}

impl MockGenerator {
    /// Reply with `text` to every request.
    #[must_use]
    pub fn with_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::with_text(MOCK_DOC_TEXT)
    }
}

#[async_trait]
impl Generator for MockGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<Generation, LlmError> {
        tracing::trace!(model = %request.model, "mock generation");
        Ok(Generation {
            text: self.text.clone(),
            usage: Usage::default(),
        })
    }
}

/// Judge that always gives the accepting label.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockJudge;

#[async_trait]
impl Judge for MockJudge {
    async fn classify(
        &self,
        _prompt: &str,
        labels: &LabelSet,
    ) -> Result<Classification, LlmError> {
        Ok(Classification {
            label: Some(labels.accepting().to_string()),
            answer: labels.accepting().to_string(),
            usage: Usage::default(),
        })
    }
}

//! LLM client: OpenAI-compatible chat completions.

use serde::{Deserialize, Serialize};

use crate::error::LlmError;

/// One chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// `system`, `user` or `assistant`.
    pub role: String,
    /// Message text.
    pub content: String,
}

impl ChatMessage {
    /// A system message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// A user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request body for chat completions (OpenAI format).
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// Response: choices[0].message plus usage.
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<UsageBody>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsageBody {
    #[serde(default)]
    total_tokens: u64,
}

/// Text and token count of one completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    /// Assistant message content.
    pub content: String,
    /// Reported total tokens (0 when the server reports none).
    pub total_tokens: u64,
}

/// HTTP client for chat completions.
#[derive(Debug, Clone)]
pub struct ChatClient {
    client: reqwest::Client,
    inference_url: String,
    api_key: Option<String>,
}

impl ChatClient {
    /// Client for the API rooted at `api_base` (e.g. `https://api.openai.com/v1`).
    #[must_use]
    pub fn new(api_base: &str, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            inference_url: format!("{}/chat/completions", api_base.trim_end_matches('/')),
            api_key,
        }
    }

    /// Endpoint requests are sent to.
    #[must_use]
    pub fn inference_url(&self) -> &str {
        &self.inference_url
    }

    /// Send `messages` to `model` and return the first choice.
    ///
    /// # Errors
    /// Returns `LlmError` on transport failure, a non-success status, an
    /// unparseable body, or a reply without content.
    pub async fn complete(
        &self,
        model: &str,
        messages: &[ChatMessage],
        temperature: Option<f32>,
    ) -> Result<Completion, LlmError> {
        let body = ChatCompletionRequest {
            model,
            messages,
            temperature,
        };
        let mut req = self
            .client
            .post(&self.inference_url)
            .json(&body)
            .header("Content-Type", "application/json");
        if let Some(ref key) = self.api_key {
            req = req.header("Authorization", format!("Bearer {key}"));
        }
        tracing::debug!(model, url = %self.inference_url, "chat completion request");
        let res = req.send().await?;
        let status = res.status();
        let text = res.text().await?;
        if !status.is_success() {
            return Err(LlmError::Api {
                status: status.as_u16(),
                body: text,
            });
        }
        parse_completion(&text)
    }
}

/// Parse a chat completion response body.
///
/// # Errors
/// Returns `LlmError::Parse` for malformed bodies and `LlmError::Empty` when
/// no choice carries content.
pub(crate) fn parse_completion(body: &str) -> Result<Completion, LlmError> {
    let parsed: ChatCompletionResponse =
        serde_json::from_str(body).map_err(|e| LlmError::Parse {
            message: e.to_string(),
            body: body.to_string(),
        })?;
    let content = parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(LlmError::Empty)?;
    Ok(Completion {
        content,
        total_tokens: parsed.usage.map_or(0, |usage| usage.total_tokens),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_completion_with_usage() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"Adds."},"finish_reason":"stop"}],"usage":{"prompt_tokens":90,"completion_tokens":10,"total_tokens":100}}"#;
        let completion = parse_completion(body).unwrap();
        assert_eq!(completion.content, "Adds.");
        assert_eq!(completion.total_tokens, 100);
    }

    #[test]
    fn test_parse_completion_without_usage_or_content() {
        let body = r#"{"choices":[{"message":{"content":"ok"}}]}"#;
        assert_eq!(parse_completion(body).unwrap().total_tokens, 0);

        let empty = r#"{"choices":[]}"#;
        assert!(matches!(parse_completion(empty), Err(LlmError::Empty)));
        assert!(matches!(
            parse_completion("not json"),
            Err(LlmError::Parse { .. })
        ));
    }

    #[test]
    fn test_inference_url() {
        let client = ChatClient::new("http://localhost:4000/v1/", None);
        assert_eq!(
            client.inference_url(),
            "http://localhost:4000/v1/chat/completions"
        );
    }
}

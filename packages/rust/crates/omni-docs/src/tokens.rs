//! Token counting and truncation (cl100k_base).

use std::sync::OnceLock;

use tiktoken_rs::CoreBPE;

static CL100K_BASE: OnceLock<Option<CoreBPE>> = OnceLock::new();

fn bpe() -> Option<&'static CoreBPE> {
    CL100K_BASE
        .get_or_init(|| match tiktoken_rs::cl100k_base() {
            Ok(bpe) => Some(bpe),
            Err(error) => {
                tracing::warn!(error = %error, "cl100k_base unavailable; estimating token counts");
                None
            }
        })
        .as_ref()
}

/// Count tokens in `text`, falling back to a 4-chars-per-token estimate.
#[must_use]
pub fn count_tokens(text: &str) -> usize {
    bpe().map_or_else(
        || estimate_token_count(text),
        |bpe| bpe.encode_with_special_tokens(text).len(),
    )
}

/// Keep the first `max_tokens` tokens of `text`.
#[must_use]
pub fn truncate(text: &str, max_tokens: usize) -> String {
    let Some(bpe) = bpe() else {
        return estimate_truncate(text, max_tokens);
    };
    let tokens = bpe.encode_with_special_tokens(text);
    if tokens.len() <= max_tokens {
        return text.to_string();
    }
    let head: Vec<_> = tokens.into_iter().take(max_tokens).collect();
    bpe.decode(head)
        .unwrap_or_else(|_| estimate_truncate(text, max_tokens))
}

fn estimate_token_count(text: &str) -> usize {
    text.chars().count().div_ceil(4)
}

fn estimate_truncate(text: &str, max_tokens: usize) -> String {
    text.chars().take(max_tokens.saturating_mul(4)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_shortens_long_text() {
        let text = "word ".repeat(200);
        let short = truncate(&text, 10);
        assert!(count_tokens(&short) <= 10);
        assert!(text.starts_with(&short));
    }

    #[test]
    fn test_short_text_untouched() {
        assert_eq!(truncate("hello", 50), "hello");
        assert_eq!(count_tokens(""), 0);
    }
}

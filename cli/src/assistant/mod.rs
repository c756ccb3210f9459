//! # Language Model Assistant (`assistant`)
//!
//! File: cli/src/assistant/mod.rs
//!
//! ## Overview
//!
//! The optional text-generation service used for two purposes:
//! - **Rephrasing**: turning the next catalog question into a friendlier line.
//! - **Selection**: picking which unanswered question to ask next.
//!
//! The service is untrusted and best-effort. Every call is bounded by a
//! timeout and every reply is checked before it is used. All operations
//! return `Result<_, AssistantError>` and the conversation session decides
//! what to do on failure (canned phrasing, retry, or fixed-order fallback).
//! Errors from this module are never shown to the user.
//!
//! ## Architecture
//!
//! - `TextGenerator`: async trait over "prompt in, text out". `OllamaClient`
//!   is the production implementation; tests use scripted generators.
//! - `Assistant`: wraps a generator with the timeout, prompt rendering and
//!   reply checks.
//! - `parse_selection` / `clean_reply`: pure reply parsers.
//!
use crate::core::config::AssistantConfig;
use crate::core::error::AssistantError;
use crate::core::templating::{
    render_prompt, RephrasePrompt, SelectionPrompt, REPHRASE_TEMPLATE, SELECTION_TEMPLATE,
};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace};

/// Ollama HTTP client.
pub mod ollama;

pub use ollama::OllamaClient;

/// Replies shorter than this are discarded.
pub const MIN_REPLY_CHARS: usize = 5;

/// Prompt in, generated text out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, AssistantError>;

    /// Model name for logging.
    fn model_name(&self) -> &str;
}

/// The question the model wants asked next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Zero-based catalog index.
    Question(usize),
    /// The model considers the booking complete.
    Confirmed,
}

/// A text generator plus the limits applied to every call.
#[derive(Clone)]
pub struct Assistant {
    generator: Arc<dyn TextGenerator>,
    timeout: Duration,
    max_reply_chars: usize,
}

impl Assistant {
    pub fn new(generator: Arc<dyn TextGenerator>, timeout: Duration, max_reply_chars: usize) -> Self {
        Self {
            generator,
            timeout,
            max_reply_chars,
        }
    }

    /// Builds an assistant backed by Ollama.
    pub fn from_config(config: &AssistantConfig) -> Result<Self, AssistantError> {
        let client = OllamaClient::new(config)?;
        Ok(Self::new(
            Arc::new(client),
            Duration::from_secs(config.timeout_secs),
            config.max_reply_chars,
        ))
    }

    pub fn model_name(&self) -> &str {
        self.generator.model_name()
    }

    async fn complete(&self, prompt: &str) -> Result<String, AssistantError> {
        trace!(model = self.model_name(), "Calling text generator");
        match tokio::time::timeout(self.timeout, self.generator.generate(prompt)).await {
            Ok(result) => result,
            Err(_) => Err(AssistantError::Timeout {
                secs: self.timeout.as_secs(),
            }),
        }
    }

    /// Asks for a friendlier phrasing of the next question.
    pub async fn rephrase(&self, prompt: &RephrasePrompt<'_>) -> Result<String, AssistantError> {
        let rendered = render_prompt(REPHRASE_TEMPLATE, prompt)
            .map_err(|e| AssistantError::Malformed(format!("{:#}", e)))?;
        let reply = self.complete(&rendered).await?;
        let cleaned = clean_reply(&reply, self.max_reply_chars)?;
        debug!("Rephrased next question: {}", cleaned);
        Ok(cleaned)
    }

    /// Asks which question to put to the user next.
    pub async fn select_next(
        &self,
        prompt: &SelectionPrompt<'_>,
        question_count: usize,
    ) -> Result<Selection, AssistantError> {
        let rendered = render_prompt(SELECTION_TEMPLATE, prompt)
            .map_err(|e| AssistantError::Malformed(format!("{:#}", e)))?;
        let reply = self.complete(&rendered).await?;
        parse_selection(&reply, question_count)
    }
}

/// The phrasing used whenever rephrasing is unavailable or fails.
pub fn fallback_phrasing(next_question: &str) -> String {
    format!("Great! Now, {}", next_question)
}

/// Trims a reply, strips wrapping quotes and enforces the length bounds.
pub fn clean_reply(raw: &str, max_chars: usize) -> Result<String, AssistantError> {
    let trimmed = raw.trim();
    let unquoted = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed)
        .trim();

    let length = unquoted.chars().count();
    if length < MIN_REPLY_CHARS {
        return Err(AssistantError::EmptyReply);
    }
    if length > max_chars {
        return Err(AssistantError::Malformed(format!(
            "reply is {} characters long, limit is {}",
            length, max_chars
        )));
    }
    Ok(unquoted.to_string())
}

/// Parses `"3. How many guests..."` into `Selection::Question(2)`.
///
/// A reply starting with "confirmed" (any case) is `Selection::Confirmed`.
/// Otherwise the text before the first `.` must be a question number in
/// `1..=question_count`.
pub fn parse_selection(reply: &str, question_count: usize) -> Result<Selection, AssistantError> {
    let trimmed = reply.trim();
    if trimmed.to_lowercase().starts_with("confirmed") {
        return Ok(Selection::Confirmed);
    }

    let leading = trimmed
        .split('.')
        .next()
        .unwrap_or_default()
        .trim_matches(|c: char| c.is_whitespace() || c == '*' || c == '"' || c == '\'');
    let number: usize = leading
        .parse()
        .map_err(|_| AssistantError::Malformed(format!("no question number in '{}'", trimmed)))?;

    if number == 0 || number > question_count {
        return Err(AssistantError::Malformed(format!(
            "question number {} is outside 1..={}",
            number, question_count
        )));
    }
    Ok(Selection::Question(number - 1))
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    fn rephrase_prompt() -> RephrasePrompt<'static> {
        RephrasePrompt {
            hotel_name: "Grand Azure Hotel",
            progress: "",
            conversation: "",
            current_question: "What is your name?",
            user_input: "Ada",
            next_question: "What is your check-in and check-out date?",
        }
    }

    #[test]
    fn test_parse_selection() {
        assert_eq!(
            parse_selection("3. How many guests will be staying?", 7).unwrap(),
            Selection::Question(2)
        );
        assert_eq!(parse_selection("  1.", 7).unwrap(), Selection::Question(0));
        assert_eq!(parse_selection("**2. When?**", 7).unwrap(), Selection::Question(1));
        assert_eq!(parse_selection("7", 7).unwrap(), Selection::Question(6));
        assert_eq!(
            parse_selection("Confirmed! Enjoy your stay.", 7).unwrap(),
            Selection::Confirmed
        );
    }

    #[test]
    fn test_parse_selection_rejects_garbage() {
        assert!(parse_selection("Sure! Next question:", 7).is_err());
        assert!(parse_selection("0. Nothing", 7).is_err());
        assert!(parse_selection("8. Out of range", 7).is_err());
        assert!(parse_selection("", 7).is_err());
    }

    #[test]
    fn test_clean_reply_bounds() {
        assert_eq!(
            clean_reply("  \"Lovely, Ada! When are you arriving?\"\n", 400).unwrap(),
            "Lovely, Ada! When are you arriving?"
        );
        assert!(matches!(clean_reply("ok", 400), Err(AssistantError::EmptyReply)));
        assert!(matches!(clean_reply("   ", 400), Err(AssistantError::EmptyReply)));
        assert!(matches!(
            clean_reply(&"a".repeat(50), 20),
            Err(AssistantError::Malformed(_))
        ));
    }

    #[test]
    fn test_fallback_phrasing() {
        assert_eq!(
            fallback_phrasing("How many guests will be staying?"),
            "Great! Now, How many guests will be staying?"
        );
    }

    #[tokio::test]
    async fn test_rephrase_uses_generator_reply() {
        let generator = Arc::new(ScriptedGenerator::new(["Thanks Ada! When will you arrive?"]));
        let assistant = assistant_with(generator.clone());
        let reply = assistant.rephrase(&rephrase_prompt()).await.unwrap();
        assert_eq!(reply, "Thanks Ada! When will you arrive?");
        assert_eq!(generator.calls(), 1);
        assert!(generator.prompts()[0].contains("and the user responded: \"Ada\""));
    }

    #[tokio::test]
    async fn test_rephrase_times_out() {
        let assistant = Assistant::new(Arc::new(StalledGenerator), Duration::from_millis(20), 400);
        let result = assistant.rephrase(&rephrase_prompt()).await;
        assert!(matches!(result, Err(AssistantError::Timeout { .. })));
    }

    #[tokio::test]
    async fn test_select_next_parses_reply() {
        let assistant = assistant_with(Arc::new(ScriptedGenerator::new(["2. When?", "nonsense"])));
        let prompt = SelectionPrompt {
            hotel_name: "Grand Azure Hotel",
            question_list: "1. A?\n2. B?",
            progress: "",
            latest: "start",
        };
        assert_eq!(
            assistant.select_next(&prompt, 2).await.unwrap(),
            Selection::Question(1)
        );
        assert!(assistant.select_next(&prompt, 2).await.is_err());
    }
}

//! # Hotelbot Prompt Templates
//!
//! File: cli/src/core/templating.rs
//!
//! ## Overview
//!
//! This module renders the prompts sent to the language model. Prompts are
//! Tera templates filled from a `serde::Serialize` context struct, so each
//! prompt's inputs are spelled out as typed fields instead of ad-hoc string
//! concatenation.
//!
//! Two prompts exist:
//! - `REPHRASE_TEMPLATE`: asks the model to phrase the next question in a
//!   friendly way, given the progress view, a short history window and the
//!   previous exchange.
//! - `SELECTION_TEMPLATE`: asks the model to pick the next unanswered question
//!   by number, or to reply "confirmed" once everything is collected.
//!
//! Autoescaping is disabled: prompts are plain text, not HTML.
//!
//! ## Examples
//!
//! ```rust
//! let prompt = templating::render_prompt(REPHRASE_TEMPLATE, &RephrasePrompt {
//!     hotel_name: "Grand Azure Hotel",
//!     progress: &progress,
//!     conversation: &history,
//!     current_question: "What is your name?",
//!     user_input: "Ada",
//!     next_question: "What is your check-in and check-out date?",
//! })?;
//! ```
//!
use crate::core::error::{BookingError, Result};
use anyhow::anyhow;
use serde::Serialize;
use tera::Tera;
use tracing::trace;

pub const REPHRASE_TEMPLATE: &str = r#"
You are an AI Hotel Reservation Bot for '{{ hotel_name }}'.
You are collecting booking information step by step.

Current booking progress:
{{ progress }}

Recent conversation:
{{ conversation }}

You just asked: "{{ current_question }}"
and the user responded: "{{ user_input }}"

Now ask the next question politely: "{{ next_question }}"
Make it conversational and friendly but keep it brief.
"#;

pub const SELECTION_TEMPLATE: &str = r#"
You are an AI Hotel Reservation Bot for '{{ hotel_name }}'.
Your goal is to collect the required booking details step by step.
Keep track of the conversation, but do NOT repeat questions already answered.

Ask the following questions in order, one at a time:

{{ question_list }}

Important Rules:
- **DO NOT show the conversation history or tracking data** in your response.
- **DO NOT repeat questions that have already been answered.**
- If all questions are answered, reply with the single word "confirmed".
- Your response MUST be the next question prefixed by its number (e.g., '3. How many guests...'),
  or the confirmation message if all questions are answered.

Current booking progress:
{{ progress }}

User's latest input:
{{ latest }}

AI response (next question or confirmation):
"#;

/// Context for `REPHRASE_TEMPLATE`.
#[derive(Serialize, Debug)]
pub struct RephrasePrompt<'a> {
    pub hotel_name: &'a str,
    pub progress: &'a str,
    pub conversation: &'a str,
    pub current_question: &'a str,
    pub user_input: &'a str,
    pub next_question: &'a str,
}

/// Context for `SELECTION_TEMPLATE`.
#[derive(Serialize, Debug)]
pub struct SelectionPrompt<'a> {
    pub hotel_name: &'a str,
    pub question_list: &'a str,
    pub progress: &'a str,
    pub latest: &'a str,
}

/// Renders `template` with the fields of `context`.
pub fn render_prompt<C: Serialize>(template: &str, context: &C) -> Result<String> {
    let tera_context = tera::Context::from_serialize(context).map_err(|e| {
        anyhow!(BookingError::Template { source: e })
            .context("Failed to create Tera context for prompt")
    })?;
    let rendered = Tera::one_off(template, &tera_context, false).map_err(|e| {
        anyhow!(BookingError::Template { source: e }).context("Tera rendering failed for prompt")
    })?;
    trace!("Rendered prompt:\n{}", rendered);
    Ok(rendered.trim().to_string())
}

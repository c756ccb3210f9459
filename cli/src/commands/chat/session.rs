//! # Conversation Session
//!
//! File: cli/src/commands/chat/session.rs
//!
//! ## Overview
//!
//! Drives one booking conversation over a line-oriented console. The session
//! owns the answer sheet and the conversation history; configuration and the
//! optional assistant are fixed at construction time.
//!
//! ## State Machine
//!
//! ```text
//! AwaitingQuestion(i) --valid answer--> AwaitingQuestion(next) | Done
//! AwaitingQuestion(i) --invalid------> AwaitingQuestion(i)     (re-prompt)
//! any state           --"exit"-------> session ends, no confirmation
//! Done                ---------------> confirmation printed once
//! ```
//!
//! `next` comes from the selection strategy. `Fixed` takes the first pending
//! question in catalog order. `Assistant` asks the language model and accepts
//! its pick only if it names a pending question and respects mandatory-first
//! ordering. Unusable picks are retried up to `max_selection_attempts` times,
//! then the fixed order is used for that turn.
//!
//! After an answer is recorded, the next question may be rephrased by the
//! language model. Any failure there is logged and replaced by
//! `fallback_phrasing`; the session itself never fails because of the model.
//!
use crate::assistant::{fallback_phrasing, Assistant, Selection};
use crate::booking::answers::AnswerSheet;
use crate::booking::catalog::{Catalog, QuestionKind};
use crate::booking::confirmation::Confirmation;
use crate::booking::progress::{format_progress, progress_block};
use crate::booking::validator::validate;
use crate::core::config::{BotConfig, CompletionPolicy, SelectionStrategy};
use crate::core::error::{BookingError, Result};
use crate::core::templating::{RephrasePrompt, SelectionPrompt};
use anyhow::{anyhow, Context};
use std::fmt;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info};

pub const EXIT_KEYWORD: &str = "exit";
pub const SKIP_KEYWORD: &str = "skip";
pub const FAREWELL_MESSAGE: &str = "Thank you for using our service. Have a great day!";
pub const WELCOME_MESSAGE: &str =
    "Great! I'd be happy to help you book a room. Let's get started with your information.";
pub const MANDATORY_COMPLETE_MESSAGE: &str = "Great! I have collected all the necessary details. Let's finalize your booking with a few more optional preferences.";
pub const SKIP_HINT: &str = "(Optional questions can be answered with 'skip'.)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for an answer to the catalog question at this index.
    AwaitingQuestion(usize),
    Done,
}

#[derive(Debug)]
pub enum SessionOutcome {
    Completed(Confirmation),
    /// The user typed "exit".
    Exited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Bot,
}

/// One history entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
}

impl Turn {
    fn user(text: &str) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.to_string(),
        }
    }

    fn bot(text: &str) -> Self {
        Self {
            speaker: Speaker::Bot,
            text: text.to_string(),
        }
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.speaker {
            Speaker::User => write!(f, "User: {}", self.text),
            Speaker::Bot => write!(f, "Bot: {}", self.text),
        }
    }
}

pub struct Session {
    config: BotConfig,
    assistant: Option<Assistant>,
    sheet: AnswerSheet,
    history: Vec<Turn>,
    state: SessionState,
    mandatory_announced: bool,
}

impl Session {
    pub fn new(config: BotConfig, assistant: Option<Assistant>) -> Self {
        Self {
            config,
            assistant,
            sheet: AnswerSheet::new(),
            history: Vec::new(),
            state: SessionState::AwaitingQuestion(0),
            mandatory_announced: false,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn answers(&self) -> &AnswerSheet {
        &self.sheet
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    fn catalog(&self) -> &Catalog {
        &self.config.catalog
    }

    /// Runs the conversation until completion or "exit".
    pub async fn run<R, W>(&mut self, input: &mut R, output: &mut W) -> Result<SessionOutcome>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let hotel = self.config.hotel_name.clone();
        writeln!(
            output,
            "\nWelcome to {} Reservation ChatBot! Type '{}' to quit.\n",
            hotel, EXIT_KEYWORD
        )?;
        writeln!(
            output,
            "Bot: Hello! I'm the {} reservation assistant. How can I help you today?",
            hotel
        )?;

        let opening = read_reply(input, output).await?;
        if is_exit(&opening) {
            return say_farewell(output);
        }
        self.history.push(Turn::user(&opening));

        writeln!(output, "\nBot: {}", WELCOME_MESSAGE)?;
        self.history.push(Turn::bot(WELCOME_MESSAGE));
        if self.config.completion == CompletionPolicy::Mandatory && !self.catalog().optional().is_empty() {
            writeln!(output, "{}", SKIP_HINT)?;
        }
        self.show_progress(output)?;

        self.state = self.next_state().await;
        let mut phrasing: Option<String> = None;
        let mut shown: Option<usize> = None;

        while let SessionState::AwaitingQuestion(index) = self.state {
            let question = self
                .catalog()
                .get(index)
                .ok_or_else(|| {
                    anyhow!(BookingError::Catalog(format!(
                        "Question index {} is out of range.",
                        index
                    )))
                })?
                .to_string();

            let prompt = phrasing.take().unwrap_or_else(|| question.clone());
            writeln!(output, "\nBot: {}", prompt)?;
            if shown != Some(index) {
                self.history.push(Turn::bot(&prompt));
                shown = Some(index);
            }

            let reply = read_reply(input, output).await?;
            if is_exit(&reply) {
                debug!("User exited at question {}", index + 1);
                return say_farewell(output);
            }

            if self.can_skip(index) && reply.eq_ignore_ascii_case(SKIP_KEYWORD) {
                self.sheet.skip(&question)?;
                debug!("Skipped optional question {}", index + 1);
            } else {
                let validation = validate(&question, &reply);
                if !validation.is_ok() {
                    debug!("Rejected answer for question {}", index + 1);
                    writeln!(output, "\nBot: {}", validation.message())?;
                    continue;
                }
                self.sheet.record(&question, &reply)?;
                debug!("Recorded answer for question {}", index + 1);
            }
            self.history.push(Turn::user(&reply));

            self.show_progress(output)?;
            let announced = self.announce_mandatory_complete(output)?;

            self.state = self.next_state().await;
            if let SessionState::AwaitingQuestion(next) = self.state {
                if !announced {
                    phrasing = Some(self.phrase_next(&question, &reply, next).await);
                }
            }
        }

        info!("All questions settled, rendering confirmation.");
        let confirmation = Confirmation::new(&hotel, self.catalog(), &self.sheet);
        writeln!(output, "{}", confirmation)?;
        output.flush()?;
        Ok(SessionOutcome::Completed(confirmation))
    }

    fn can_skip(&self, index: usize) -> bool {
        self.config.completion == CompletionPolicy::Mandatory
            && self.catalog().kind(index) == QuestionKind::Optional
    }

    fn show_progress<W: Write>(&self, output: &mut W) -> Result<()> {
        if self.config.show_progress {
            writeln!(output, "\n{}\n", progress_block(self.catalog(), &self.sheet))?;
        }
        Ok(())
    }

    /// Prints the one-time message once every mandatory question is settled.
    fn announce_mandatory_complete<W: Write>(&mut self, output: &mut W) -> Result<bool> {
        if self.mandatory_announced {
            return Ok(false);
        }
        let complete = self
            .catalog()
            .mandatory()
            .iter()
            .all(|q| self.sheet.is_settled(q));
        if complete {
            self.mandatory_announced = true;
            writeln!(output, "\nBot: {}", MANDATORY_COMPLETE_MESSAGE)?;
            self.history.push(Turn::bot(MANDATORY_COMPLETE_MESSAGE));
        }
        Ok(complete)
    }

    /// Catalog indices still waiting for an answer, in catalog order.
    fn pending(&self) -> Vec<usize> {
        self.catalog()
            .questions()
            .iter()
            .enumerate()
            .filter(|(_, q)| !self.sheet.is_settled(q))
            .map(|(i, _)| i)
            .collect()
    }

    async fn next_state(&self) -> SessionState {
        let pending = self.pending();
        let Some(&first) = pending.first() else {
            return SessionState::Done;
        };

        match (self.config.assistant.selection, &self.assistant) {
            (SelectionStrategy::Assistant, Some(assistant)) => {
                self.select_with_assistant(assistant, &pending, first).await
            }
            _ => SessionState::AwaitingQuestion(first),
        }
    }

    async fn select_with_assistant(
        &self,
        assistant: &Assistant,
        pending: &[usize],
        first: usize,
    ) -> SessionState {
        let catalog = self.catalog();
        // Optional questions become eligible only after every mandatory one.
        let eligible: Vec<usize> = if catalog.kind(first) == QuestionKind::Mandatory {
            pending
                .iter()
                .copied()
                .filter(|&i| catalog.kind(i) == QuestionKind::Mandatory)
                .collect()
        } else {
            pending.to_vec()
        };

        let progress = format_progress(catalog, &self.sheet);
        let question_list = catalog.numbered();
        let prompt = SelectionPrompt {
            hotel_name: &self.config.hotel_name,
            question_list: &question_list,
            progress: &progress,
            latest: self.sheet.last_answer().unwrap_or("start"),
        };

        let attempts = self.config.assistant.max_selection_attempts;
        for attempt in 1..=attempts {
            match assistant.select_next(&prompt, catalog.len()).await {
                Ok(Selection::Question(index)) if eligible.contains(&index) => {
                    debug!("Assistant selected question {}", index + 1);
                    return SessionState::AwaitingQuestion(index);
                }
                Ok(Selection::Question(index)) => {
                    debug!(
                        "Attempt {}/{}: question {} is not eligible",
                        attempt,
                        attempts,
                        index + 1
                    );
                }
                Ok(Selection::Confirmed) => {
                    debug!(
                        "Attempt {}/{}: confirmation with {} questions pending",
                        attempt,
                        attempts,
                        pending.len()
                    );
                }
                Err(e) => {
                    debug!("Attempt {}/{}: selection failed: {}", attempt, attempts, e);
                }
            }
        }

        info!(
            "Assistant gave no usable selection after {} attempts, asking question {} in catalog order.",
            attempts,
            first + 1
        );
        SessionState::AwaitingQuestion(first)
    }

    fn rephraser(&self) -> Option<&Assistant> {
        if self.config.assistant.rephrase {
            self.assistant.as_ref()
        } else {
            None
        }
    }

    /// Phrasing for the next question: rephrased, canned fallback, or plain.
    async fn phrase_next(&self, asked: &str, answer: &str, next: usize) -> String {
        let next_question = self.catalog().get(next).unwrap_or_default();
        let Some(assistant) = self.rephraser() else {
            return next_question.to_string();
        };

        let progress = format_progress(self.catalog(), &self.sheet);
        let window = self.config.assistant.history_window;
        let start = self.history.len().saturating_sub(window);
        let conversation = self.history[start..]
            .iter()
            .map(Turn::to_string)
            .collect::<Vec<_>>()
            .join("; ");

        let prompt = RephrasePrompt {
            hotel_name: &self.config.hotel_name,
            progress: &progress,
            conversation: &conversation,
            current_question: asked,
            user_input: answer,
            next_question,
        };

        match assistant.rephrase(&prompt).await {
            Ok(text) => text,
            Err(e) => {
                debug!("Rephrasing failed, using canned phrasing: {}", e);
                fallback_phrasing(next_question)
            }
        }
    }
}

fn is_exit(reply: &str) -> bool {
    reply.eq_ignore_ascii_case(EXIT_KEYWORD)
}

fn say_farewell<W: Write>(output: &mut W) -> Result<SessionOutcome> {
    writeln!(output, "Bot: {}", FAREWELL_MESSAGE)?;
    output.flush()?;
    Ok(SessionOutcome::Exited)
}

/// Prints the input prompt and reads one trimmed line.
async fn read_reply<R, W>(input: &mut R, output: &mut W) -> Result<String>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    write!(output, "You: ")?;
    output.flush()?;
    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .await
        .map_err(BookingError::from)
        .context("Failed to read from standard input")?;
    if read == 0 {
        return Err(anyhow!(BookingError::InputClosed));
    }
    Ok(line.trim().to_string())
}

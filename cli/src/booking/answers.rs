//! # Answer Sheet
//!
//! File: cli/src/booking/answers.rs
//!
//! ## Overview
//!
//! The answer mapping for one session: question text to the raw user answer.
//! The sheet only grows. Once a question has an answer (or has been skipped)
//! it can never be changed; attempts are rejected with
//! `BookingError::DuplicateAnswer`. Entries are kept in the order they were
//! recorded, which is catalog order under fixed-index selection.
//!
use crate::core::error::{BookingError, Result};
use anyhow::anyhow;

/// Recorded state of one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerStatus<'a> {
    Answered(&'a str),
    Skipped,
    Pending,
}

#[derive(Debug, Clone, Default)]
pub struct AnswerSheet {
    answers: Vec<(String, String)>,
    skipped: Vec<String>,
}

impl AnswerSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `answer` for `question`.
    pub fn record(&mut self, question: &str, answer: &str) -> Result<()> {
        self.ensure_open(question)?;
        self.answers
            .push((question.to_string(), answer.to_string()));
        Ok(())
    }

    /// Marks an optional question as deliberately left unanswered.
    pub fn skip(&mut self, question: &str) -> Result<()> {
        self.ensure_open(question)?;
        self.skipped.push(question.to_string());
        Ok(())
    }

    fn ensure_open(&self, question: &str) -> Result<()> {
        if self.is_settled(question) {
            return Err(anyhow!(BookingError::DuplicateAnswer {
                question: question.to_string(),
            }));
        }
        Ok(())
    }

    pub fn get(&self, question: &str) -> Option<&str> {
        self.answers
            .iter()
            .find(|(q, _)| q == question)
            .map(|(_, a)| a.as_str())
    }

    pub fn status(&self, question: &str) -> AnswerStatus<'_> {
        match self.get(question) {
            Some(answer) => AnswerStatus::Answered(answer),
            None if self.skipped.iter().any(|q| q == question) => AnswerStatus::Skipped,
            None => AnswerStatus::Pending,
        }
    }

    /// True once the question is answered or skipped.
    pub fn is_settled(&self, question: &str) -> bool {
        !matches!(self.status(question), AnswerStatus::Pending)
    }

    /// The most recently recorded answer.
    pub fn last_answer(&self) -> Option<&str> {
        self.answers.last().map(|(_, a)| a.as_str())
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }
}

//! # Question Catalog
//!
//! File: cli/src/booking/catalog.rs
//!
//! ## Overview
//!
//! The ordered list of questions the bot asks. Questions are partitioned into
//! two groups: **mandatory** questions are always asked first and in order,
//! **optional** questions follow. The catalog is built once at startup and is
//! never mutated afterwards.
//!
//! Two built-in catalogs exist:
//! - `Catalog::standard()`: 3 mandatory + 4 optional questions (the default).
//! - `Catalog::extended()`: a 10-question list that also covers special
//!   requests, airport pickup and a reminder message.
//!
//! Custom catalogs are built with `Catalog::new`, which rejects empty
//! mandatory groups, blank questions and duplicates.
//!
use crate::core::error::{BookingError, Result};
use anyhow::anyhow;
use std::collections::HashSet;

pub const NAME_QUESTION: &str = "What is your name?";
pub const DATE_QUESTION: &str = "What is your check-in and check-out date?";
pub const GUESTS_QUESTION: &str = "How many guests will be staying?";
pub const BREAKFAST_QUESTION: &str = "Would you like to include breakfast in your stay?";
pub const ROOM_QUESTION: &str = "What type of room would you prefer? (Standard, Deluxe, Suite)?";
pub const PAYMENT_QUESTION: &str =
    "How would you like to make the payment? (Credit Card, Debit Card, Cash, Online)?";
pub const CONTACT_QUESTION: &str = "Can I have your contact number for confirmation?";

/// Which group a question belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    Mandatory,
    Optional,
}

/// Immutable, ordered question list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    questions: Vec<String>,
    mandatory_count: usize,
}

impl Catalog {
    /// Builds a catalog from the two groups, mandatory first.
    pub fn new(mandatory: Vec<String>, optional: Vec<String>) -> Result<Self> {
        if mandatory.is_empty() {
            return Err(anyhow!(BookingError::Catalog(
                "At least one mandatory question is required.".to_string()
            )));
        }
        let mandatory_count = mandatory.len();
        let questions: Vec<String> = mandatory
            .into_iter()
            .chain(optional)
            .map(|q| q.trim().to_string())
            .collect();

        let mut seen = HashSet::new();
        for question in &questions {
            if question.is_empty() {
                return Err(anyhow!(BookingError::Catalog(
                    "Questions cannot be blank.".to_string()
                )));
            }
            if !seen.insert(question.as_str()) {
                return Err(anyhow!(BookingError::Catalog(format!(
                    "Duplicate question '{}'.",
                    question
                ))));
            }
        }

        Ok(Self {
            questions,
            mandatory_count,
        })
    }

    /// The default reservation questions.
    pub fn standard() -> Self {
        Self {
            questions: [
                NAME_QUESTION,
                DATE_QUESTION,
                GUESTS_QUESTION,
                BREAKFAST_QUESTION,
                ROOM_QUESTION,
                PAYMENT_QUESTION,
                CONTACT_QUESTION,
            ]
            .iter()
            .map(|q| q.to_string())
            .collect(),
            mandatory_count: 3,
        }
    }

    /// Ten-question catalog with extra service questions.
    pub fn extended() -> Self {
        Self {
            questions: [
                NAME_QUESTION,
                DATE_QUESTION,
                GUESTS_QUESTION,
                BREAKFAST_QUESTION,
                "What type of room would you prefer? (Standard, Deluxe, Suite)",
                "Do you have any special requests or preferences?",
                PAYMENT_QUESTION,
                CONTACT_QUESTION,
                "Do you need airport pickup service?",
                "Would you like a reminder message before your stay?",
            ]
            .iter()
            .map(|q| q.to_string())
            .collect(),
            mandatory_count: 3,
        }
    }

    /// All questions in asking order.
    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    pub fn mandatory(&self) -> &[String] {
        &self.questions[..self.mandatory_count]
    }

    pub fn optional(&self) -> &[String] {
        &self.questions[self.mandatory_count..]
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn mandatory_count(&self) -> usize {
        self.mandatory_count
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.questions.get(index).map(String::as_str)
    }

    pub fn kind(&self, index: usize) -> QuestionKind {
        if index < self.mandatory_count {
            QuestionKind::Mandatory
        } else {
            QuestionKind::Optional
        }
    }

    /// Numbered listing (`1. What is your name?`), used in selection prompts.
    pub fn numbered(&self) -> String {
        self.questions
            .iter()
            .enumerate()
            .map(|(i, q)| format!("{}. {}", i + 1, q))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

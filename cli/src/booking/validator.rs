//! # Input Validator
//!
//! File: cli/src/booking/validator.rs
//!
//! ## Overview
//!
//! Per-question checks on raw user input. The rule applied is chosen by a
//! case-insensitive substring match on the question text, first match wins:
//!
//! | Question mentions  | Input must contain                                   |
//! |--------------------|------------------------------------------------------|
//! | `date`             | `D-D-D`, `D/D`, ... or a month abbreviation (`jan`..) |
//! | `guests`           | at least one digit                                    |
//! | `contact number`   | a run of 5 or more digits                             |
//! | anything else      | anything non-empty                                    |
//!
//! Empty input is always rejected. A rejected answer is never recorded; the
//! session re-prompts the same question.
//!
use regex::Regex;
use std::sync::LazyLock;

pub const EMPTY_MESSAGE: &str = "Please provide a response.";
pub const DATE_MESSAGE: &str = "I couldn't identify a date in your response. Please try again with a date format (e.g., July 15-20, 2025).";
pub const GUESTS_MESSAGE: &str = "Please specify the number of guests with a digit (e.g., 2).";
pub const CONTACT_MESSAGE: &str = "Please provide a valid contact number with at least 5 digits.";

static DATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\d{1,4}[-/]\d{1,2}[-/]\d{1,4}|\d{1,2}[-/]\d{1,2}|jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec",
    )
    .expect("date pattern is valid")
});
static DIGIT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("digit pattern is valid"));
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{5,}").expect("phone pattern is valid"));

/// Outcome of validating one answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Accepted,
    Rejected(&'static str),
}

impl Validation {
    pub fn is_ok(&self) -> bool {
        matches!(self, Validation::Accepted)
    }

    /// The message shown to the user, or the empty string when accepted.
    pub fn message(&self) -> &'static str {
        match self {
            Validation::Accepted => "",
            Validation::Rejected(message) => message,
        }
    }
}

/// Checks `input` against the rule implied by `question`.
pub fn validate(question: &str, input: &str) -> Validation {
    if input.is_empty() {
        return Validation::Rejected(EMPTY_MESSAGE);
    }

    let question = question.to_lowercase();
    if question.contains("date") {
        if !DATE_PATTERN.is_match(input) {
            return Validation::Rejected(DATE_MESSAGE);
        }
    } else if question.contains("guests") {
        if !DIGIT_PATTERN.is_match(input) {
            return Validation::Rejected(GUESTS_MESSAGE);
        }
    } else if question.contains("contact number") && !PHONE_PATTERN.is_match(input) {
        return Validation::Rejected(CONTACT_MESSAGE);
    }

    Validation::Accepted
}

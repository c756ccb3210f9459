//! # Hotelbot Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout the reservation chatbot.
//! There are two families of errors, and they are handled very differently:
//!
//! - `BookingError`: failures of the application itself (bad configuration,
//!   a malformed question catalog, stdin closing mid-session, I/O). These
//!   propagate up to `main`, which prints a generic apology and exits non-zero.
//! - `AssistantError`: failures of the external text-generation service. These
//!   are **always recoverable**. The conversation loop matches on them and
//!   falls back to canned phrasing or fixed-index question selection.
//!
//! `Result<T>` is an alias for `anyhow::Result<T>` so application paths can add
//! context with `.context(..)`.
//!
//! ## Examples
//!
//! ```rust
//! // Return a specific error type
//! if catalog.mandatory().is_empty() {
//!     return Err(BookingError::Catalog("no mandatory questions".into()))?;
//! }
//!
//! // Handle both outcomes of a text-generation call
//! let prompt = match assistant.rephrase(&context).await {
//!     Ok(text) => text,
//!     Err(e) => {
//!         debug!("Falling back to canned phrasing: {}", e);
//!         fallback_phrasing(next_question)
//!     }
//! };
//! ```
//!
use thiserror::Error;

/// Application errors for the reservation chatbot.
#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Question catalog error: {0}")]
    Catalog(String),

    #[error("Question '{question}' has already been answered.")]
    DuplicateAnswer { question: String },

    #[error("Input stream closed before the booking was completed.")]
    InputClosed,

    #[error("Console I/O failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("Prompt rendering error: {source}")]
    Template {
        #[from]
        source: tera::Error,
    },
}

/// Failures of the external text-generation service.
///
/// None of these ever reach the user; the session recovers from every variant.
#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("HTTP request to the language model failed: {source}")]
    Http {
        #[from]
        source: reqwest::Error,
    },

    #[error("Language model returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Language model did not answer within {secs}s")]
    Timeout { secs: u64 },

    #[error("Language model returned an empty or too short reply")]
    EmptyReply,

    #[error("Language model reply could not be used: {0}")]
    Malformed(String),
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;

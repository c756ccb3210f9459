//! # Booking Domain (`booking`)
//!
//! File: cli/src/booking/mod.rs
//!
//! ## Overview
//!
//! Pure, synchronous building blocks of a reservation. Nothing in here
//! performs console I/O or talks to the language model; the `commands::chat`
//! session wires these pieces together.
//!
//! - **`catalog`**: The ordered mandatory/optional question list.
//! - **`validator`**: Regex checks applied to answers before they are recorded.
//! - **`answers`**: The grow-only answer sheet for one session.
//! - **`progress`**: Answered/pending view over catalog and sheet.
//! - **`confirmation`**: Booking reference generation and the final summary.
//!

/// Ordered question groups.
pub mod catalog;
/// Booking confirmation summary and reference numbers.
pub mod confirmation;
/// Session answer mapping.
pub mod answers;
/// Progress display.
pub mod progress;
/// Answer validation rules.
pub mod validator;

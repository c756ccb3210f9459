//! # Progress Tracker
//!
//! File: cli/src/booking/progress.rs
//!
//! Read-only view of which catalog questions have answers. Used for the
//! on-screen progress display and as context in language model prompts; it
//! never drives control flow.
//!
use crate::booking::answers::{AnswerSheet, AnswerStatus};
use crate::booking::catalog::Catalog;

pub const PROGRESS_HEADER: &str = "--- Current Booking Progress ---";
pub const PROGRESS_FOOTER: &str = "-------------------------------";

/// One line per catalog question, in catalog order.
pub fn progress_lines(catalog: &Catalog, sheet: &AnswerSheet) -> Vec<String> {
    catalog
        .questions()
        .iter()
        .enumerate()
        .map(|(i, question)| {
            let marker = match sheet.status(question) {
                AnswerStatus::Answered(answer) => format!("✅ {}", answer),
                AnswerStatus::Skipped => "⏭️ Skipped".to_string(),
                AnswerStatus::Pending => "❌ Pending".to_string(),
            };
            format!("{}. {} - {}", i + 1, question, marker)
        })
        .collect()
}

pub fn format_progress(catalog: &Catalog, sheet: &AnswerSheet) -> String {
    progress_lines(catalog, sheet).join("\n")
}

/// The framed block printed to the console.
pub fn progress_block(catalog: &Catalog, sheet: &AnswerSheet) -> String {
    format!(
        "{}\n{}\n{}",
        PROGRESS_HEADER,
        format_progress(catalog, sheet),
        PROGRESS_FOOTER
    )
}

//! # Hotelbot Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Every command
//! built here is isolated from the developer's own setup: it points
//! `--config` at a file inside a temporary directory and clears the
//! environment variables the CLI reads.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use tempfile::TempDir;

/// A scripted run of the full standard catalog, opening line included.
pub const FULL_BOOKING: &str =
    "Hi, I need a room\nAda Lovelace\nJuly 15-20, 2025\n2\nYes please\nDeluxe\nCredit Card\n+44 2079460958\n";

/// # Get Hotelbot Command (`hotelbot_cmd`)
///
/// An `assert_cmd::Command` for the compiled `hotelbot` binary.
///
/// ## Panics
/// Panics if the binary cannot be found via `Command::cargo_bin`.
pub fn hotelbot_cmd() -> Command {
    let mut cmd = Command::cargo_bin("hotelbot").expect("Failed to find hotelbot binary for testing");
    cmd.env_remove("HOTELBOT_CONFIG")
        .env_remove("OLLAMA_HOST")
        .env_remove("RUST_LOG");
    cmd
}

/// Writes `contents` as the config file inside a fresh temporary directory.
///
/// Keep the returned `TempDir` alive for as long as the command runs.
pub fn config_dir(contents: &str) -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir for config");
    fs::write(dir.path().join("hotelbot.toml"), contents).expect("Failed to write config");
    dir
}

/// `hotelbot chat --config <dir>/hotelbot.toml --no-llm`.
pub fn offline_chat(dir: &TempDir) -> Command {
    let mut cmd = hotelbot_cmd();
    cmd.arg("chat")
        .arg("--config")
        .arg(dir.path().join("hotelbot.toml"))
        .arg("--no-llm");
    cmd
}

//! # Hotelbot CLI Questions Integration Tests
//!
//! File: cli/tests/questions.rs
//!
//! Integration tests for `hotelbot questions`.
//!

mod common;
use common::*;
use predicates::prelude::*;

#[test]
fn test_questions_lists_standard_catalog() {
    let dir = config_dir("");
    hotelbot_cmd()
        .arg("questions")
        .arg("--config")
        .arg(dir.path().join("hotelbot.toml"))
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Mandatory:\n  1. What is your name?")
                .and(predicate::str::contains("  3. How many guests will be staying?"))
                .and(predicate::str::contains(
                    "Optional:\n  4. Would you like to include breakfast in your stay?",
                )),
        );
}

#[test]
fn test_questions_uses_extended_preset() {
    let dir = config_dir("[catalog]\npreset = \"extended\"\n");
    hotelbot_cmd()
        .args(["q", "--config"])
        .arg(dir.path().join("hotelbot.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("  10. Would you like a reminder message before your stay?"));
}

#[test]
fn test_questions_rejects_duplicate_catalog() {
    let dir = config_dir("[catalog]\nmandatory = [\"Name?\", \"Name?\"]\n");
    hotelbot_cmd()
        .arg("questions")
        .arg("--config")
        .arg(dir.path().join("hotelbot.toml"))
        .assert()
        .failure()
        .stdout(predicate::str::contains("Duplicate question"));
}

#[cfg(unix)]
#[test]
fn test_questions_expands_tilde_in_config_path() {
    let home = config_dir("hotel_name = \"Tilde Lodge\"\n");
    hotelbot_cmd()
        .env("HOME", home.path())
        .args(["questions", "--config", "~/hotelbot.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Booking questions for Tilde Lodge"));
}

//! # Reservation Chat Command
//!
//! File: cli/src/commands/chat/mod.rs
//!
//! ## Overview
//!
//! Entry point for `hotelbot chat`. Loads the configuration, optionally
//! connects the language model assistant, and runs one booking session on
//! standard input/output.
//!
//! ## Examples
//!
//! ```bash
//! # Scripted flow without a language model
//! hotelbot chat --no-llm
//!
//! # Let the model choose the question order, allow skipping optional questions
//! hotelbot chat --selection assistant --completion mandatory
//!
//! # Use a remote Ollama server and a different model
//! OLLAMA_HOST=gpu-box:11434 hotelbot chat --model mistral --timeout 10
//! ```
//!
//! Flow:
//! 1. Merge configuration files with command-line overrides
//! 2. Build the Ollama-backed assistant if enabled and needed
//! 3. Run the session until completion, "exit", or ctrl-c
//!
use crate::assistant::Assistant;
use crate::core::config::{self, BotConfig, CompletionPolicy, ConfigOverrides, SelectionStrategy};
use crate::core::error::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};

/// The booking conversation loop.
pub mod session;

pub use session::{Session, SessionOutcome};

/// Exit status after ctrl-c (128 + SIGINT).
pub const INTERRUPTED_EXIT_CODE: i32 = 130;
pub const INTERRUPTED_MESSAGE: &str =
    "Bot: Booking process interrupted. Thank you for your interest!";

/// # Chat Command Arguments (`ChatArgs`)
///
/// Every flag overrides the corresponding configuration file setting.
#[derive(Parser, Debug, Default)]
pub struct ChatArgs {
    /// Load configuration from this file only, instead of the user and project files.
    #[arg(long, env = "HOTELBOT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Hotel name used in greetings and the confirmation.
    #[arg(long)]
    pub hotel: Option<String>,

    /// Run without the language model.
    #[arg(long)]
    pub no_llm: bool,

    /// Do not print the booking progress after each answer.
    #[arg(long)]
    pub no_progress: bool,

    /// Keep the language model but show questions verbatim.
    #[arg(long)]
    pub no_rephrase: bool,

    /// How the next question is chosen.
    #[arg(long, value_enum)]
    pub selection: Option<SelectionStrategy>,

    /// Which questions must be settled before confirming.
    #[arg(long, value_enum)]
    pub completion: Option<CompletionPolicy>,

    /// Ollama model name.
    #[arg(long)]
    pub model: Option<String>,

    /// Ollama server URL (or `host:port`).
    #[arg(long, env = "OLLAMA_HOST")]
    pub endpoint: Option<String>,

    /// Seconds to wait for each language model reply.
    #[arg(long)]
    pub timeout: Option<u64>,
}

impl ChatArgs {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            hotel_name: self.hotel.clone(),
            no_llm: self.no_llm,
            no_progress: self.no_progress,
            no_rephrase: self.no_rephrase,
            selection: self.selection,
            completion: self.completion,
            model: self.model.clone(),
            endpoint: self.endpoint.clone(),
            timeout_secs: self.timeout,
        }
    }
}

/// # Handle Chat Command (`handle_chat`)
///
/// Runs one booking session. Returns `Ok(())` on completion or "exit".
/// On ctrl-c the interruption message is printed and the process exits with
/// status 130.
pub async fn handle_chat(args: ChatArgs) -> Result<()> {
    debug!("Handling chat command with args: {:?}", args);
    let config = config::load_config(args.config.as_deref(), &args.overrides())?;
    let assistant = connect_assistant(&config);

    let mut session = Session::new(config, assistant);
    let mut input = tokio::io::BufReader::new(tokio::io::stdin());
    let mut output = std::io::stdout();

    let outcome = tokio::select! {
        outcome = session.run(&mut input, &mut output) => outcome?,
        Ok(()) = tokio::signal::ctrl_c() => {
            println!("\n{}", INTERRUPTED_MESSAGE);
            std::process::exit(INTERRUPTED_EXIT_CODE);
        }
    };
    debug!(
        "Session finished in state {:?} after {} turns with {} answers",
        session.state(),
        session.history().len(),
        session.answers().len()
    );

    match outcome {
        SessionOutcome::Completed(confirmation) => {
            info!(
                "Booking {} confirmed for {}",
                confirmation.booking_id,
                confirmation.field("Check-in").unwrap_or("N/A")
            );
        }
        SessionOutcome::Exited => info!("Session ended by user."),
    }
    Ok(())
}

/// Builds the assistant when the configuration needs one.
///
/// A failure here is reported once and the session continues without it.
fn connect_assistant(config: &BotConfig) -> Option<Assistant> {
    let assistant_config = &config.assistant;
    let needed = assistant_config.rephrase || assistant_config.selection == SelectionStrategy::Assistant;
    if !assistant_config.enabled || !needed {
        debug!("Language model assistant disabled.");
        return None;
    }

    match Assistant::from_config(assistant_config) {
        Ok(assistant) => {
            info!(
                "Using model '{}' at {}",
                assistant.model_name(),
                assistant_config.endpoint
            );
            println!("AI enhancement active");
            Some(assistant)
        }
        Err(e) => {
            println!("Could not initialize language model: {}", e);
            println!("Continuing with standard conversation flow.");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_map_to_overrides() {
        let args = ChatArgs::parse_from([
            "chat",
            "--hotel",
            "Harbor Hotel",
            "--no-llm",
            "--selection",
            "assistant",
            "--completion",
            "mandatory",
            "--timeout",
            "7",
        ]);
        let overrides = args.overrides();
        assert_eq!(overrides.hotel_name.as_deref(), Some("Harbor Hotel"));
        assert!(overrides.no_llm);
        assert!(!overrides.no_progress);
        assert_eq!(overrides.selection, Some(SelectionStrategy::Assistant));
        assert_eq!(overrides.completion, Some(CompletionPolicy::Mandatory));
        assert_eq!(overrides.timeout_secs, Some(7));
    }

    #[test]
    fn test_disabled_assistant_is_not_connected() {
        let mut config = BotConfig::default();
        config.assistant.enabled = false;
        assert!(connect_assistant(&config).is_none());

        let mut config = BotConfig::default();
        config.assistant.rephrase = false;
        assert!(connect_assistant(&config).is_none());
    }
}

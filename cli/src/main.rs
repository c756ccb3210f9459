//! # Hotelbot Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! Entry point for the hotel reservation chatbot. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to the command handlers
//! - Turning any unhandled error into a short apology and a non-zero exit
//!
//! Logs go to stderr so they never mix with the conversation on stdout.
//!
//! ## Examples
//!
//! ```bash
//! # Start a booking conversation
//! hotelbot chat
//!
//! # Same, without the language model and with debug logging
//! hotelbot -vv chat --no-llm
//!
//! # Show the configured questions
//! hotelbot questions
//! ```
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod assistant; // Language model client and reply parsing
mod booking; // Catalog, validation, answers, progress, confirmation
mod commands; // Command handlers (chat, questions)
mod core; // Configuration, errors, prompt templates

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "hotelbot",
    about = "🏨 hotelbot: Hotel reservation chatbot",
    long_about = "Collects hotel booking details through a guided conversation and prints\n\
                  a booking confirmation. A local Ollama model can optionally phrase\n\
                  questions or choose their order.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Parser, Debug)]
enum Commands {
    /// Start a booking conversation.
    #[command(alias = "c")]
    Chat(commands::chat::ChatArgs),
    /// List the configured booking questions.
    #[command(alias = "q")]
    Questions(commands::questions::QuestionsArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Commands::Chat(args) => commands::chat::handle_chat(args).await,
        Commands::Questions(args) => commands::questions::handle_questions(args).await,
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        println!("\nAn unexpected error occurred: {:#}", e);
        println!("Please try again later.");
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_cmd::Command;
    use predicates::prelude::*;
    fn hotelbot_cmd() -> Command {
        Command::cargo_bin("hotelbot").expect("Failed to find hotelbot binary for testing")
    }
    #[test]
    fn test_main_help_flag() {
        hotelbot_cmd().arg("--help").assert().success();
    }
    #[test]
    fn test_main_version_flag() {
        hotelbot_cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }
}

//! # Question Listing Command
//!
//! File: cli/src/commands/questions/mod.rs
//!
//! `hotelbot questions` prints the effective question catalog (after
//! configuration files are applied), grouped into mandatory and optional
//! questions and numbered the way the bot and its prompts number them.
//!
use crate::booking::catalog::Catalog;
use crate::core::config::{self, ConfigOverrides};
use crate::core::error::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
pub struct QuestionsArgs {
    /// Load configuration from this file only, instead of the user and project files.
    #[arg(long, env = "HOTELBOT_CONFIG")]
    pub config: Option<PathBuf>,
}

pub async fn handle_questions(args: QuestionsArgs) -> Result<()> {
    debug!("Handling questions command with args: {:?}", args);
    let config = config::load_config(args.config.as_deref(), &ConfigOverrides::default())?;
    print!("{}", render_catalog(&config.hotel_name, &config.catalog));
    Ok(())
}

fn render_catalog(hotel_name: &str, catalog: &Catalog) -> String {
    let mut out = format!("Booking questions for {}\n\nMandatory:\n", hotel_name);
    for (i, question) in catalog.mandatory().iter().enumerate() {
        out.push_str(&format!("  {}. {}\n", i + 1, question));
    }
    if !catalog.optional().is_empty() {
        out.push_str("\nOptional:\n");
        let offset = catalog.mandatory_count();
        for (i, question) in catalog.optional().iter().enumerate() {
            out.push_str(&format!("  {}. {}\n", offset + i + 1, question));
        }
    }
    out
}

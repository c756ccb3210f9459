//! # Hotelbot Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the top-level commands of the hotelbot CLI. Each
//! command defines its own clap argument struct and an async handler that
//! `main.rs` dispatches to.
//!
//! ## Commands
//!
//! - `chat`: Run an interactive booking conversation
//! - `questions`: Print the effective question catalog
//!

/// Interactive booking conversation (`hotelbot chat`).
pub mod chat;
/// Question catalog listing (`hotelbot questions`).
pub mod questions;

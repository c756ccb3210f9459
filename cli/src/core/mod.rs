//! # Hotelbot Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the infrastructure components shared by every
//! command:
//! - `config`: Layered configuration loading, merging and validation
//! - `error`: Error types and the `Result` alias
//! - `templating`: Tera prompt templates for the language model
//!
//! ## Usage
//!
//! ```rust
//! use crate::core::config; // For loading configuration
//! use crate::core::error::{BookingError, Result}; // For error handling
//! use crate::core::templating; // For prompt rendering
//! ```
//!
pub mod config;
pub mod error;
pub mod templating;

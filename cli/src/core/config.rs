//! # Hotelbot Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module builds the immutable `BotConfig` that is handed to the
//! conversation session at construction time. Nothing else in the application
//! reads configuration from ambient state.
//!
//! ## Architecture
//!
//! Configuration is assembled in layers, later layers overriding earlier ones:
//! 1. Default values defined in the code
//! 2. User-specific `config.toml` in the platform config directory
//! 3. Project-specific `.hotelbot.toml` in the current directory or ancestors
//!    (the search stops at a directory containing `.git`)
//! 4. Command-line flags (`ConfigOverrides`)
//!
//! When an explicit file is given (`--config` / `HOTELBOT_CONFIG`), it replaces
//! layers 2 and 3. All file fields are optional so a file only needs to name
//! what it changes. Unknown keys are rejected.
//!
//! ## Examples
//!
//! ```toml
//! hotel_name = "Seaside Inn"
//! completion = "mandatory"
//!
//! [assistant]
//! model = "llama3"
//! selection = "assistant"
//! timeout_secs = 10
//!
//! [catalog]
//! preset = "extended"
//! ```
//!
//! ```rust
//! let cfg = config::load_config(None, &ConfigOverrides::default())?;
//! println!("Booking for {}", cfg.hotel_name);
//! ```
//!
use crate::booking::catalog::Catalog;
use crate::core::error::{BookingError, Result};
use anyhow::{anyhow, Context};
use clap::ValueEnum;
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

const PROJECT_CONFIG_FILENAME: &str = ".hotelbot.toml";

/// How the next question is chosen.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SelectionStrategy {
    /// Ask questions strictly in catalog order.
    Fixed,
    /// Let the language model pick the next unanswered question.
    Assistant,
}

/// Which questions must be settled before the booking is confirmed.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CompletionPolicy {
    /// Every question needs an answer.
    All,
    /// Optional questions may be answered with "skip".
    Mandatory,
}

/// Built-in question lists.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CatalogPreset {
    Standard,
    Extended,
}

/// Settings for the external text-generation service.
#[derive(Debug, Clone, PartialEq)]
pub struct AssistantConfig {
    pub enabled: bool,
    pub endpoint: String,
    pub model: String,
    pub temperature: f32,
    pub timeout_secs: u64,
    /// Rephrase the next question after each answer.
    pub rephrase: bool,
    pub selection: SelectionStrategy,
    pub max_selection_attempts: u32,
    /// Number of history entries included in prompts.
    pub history_window: usize,
    pub max_reply_chars: usize,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "http://localhost:11434".to_string(),
            model: "llama3".to_string(),
            temperature: 0.1,
            timeout_secs: 20,
            rephrase: true,
            selection: SelectionStrategy::Fixed,
            max_selection_attempts: 3,
            history_window: 3,
            max_reply_chars: 400,
        }
    }
}

/// Effective configuration for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct BotConfig {
    pub hotel_name: String,
    pub show_progress: bool,
    pub completion: CompletionPolicy,
    pub assistant: AssistantConfig,
    pub catalog: Catalog,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            hotel_name: "Grand Azure Hotel".to_string(),
            show_progress: true,
            completion: CompletionPolicy::All,
            assistant: AssistantConfig::default(),
            catalog: Catalog::standard(),
        }
    }
}

/// Values supplied on the command line. `None`/`false` leaves a setting alone.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub hotel_name: Option<String>,
    pub no_llm: bool,
    pub no_progress: bool,
    pub no_rephrase: bool,
    pub selection: Option<SelectionStrategy>,
    pub completion: Option<CompletionPolicy>,
    pub model: Option<String>,
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// On-disk layout. Every field is optional.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    hotel_name: Option<String>,
    show_progress: Option<bool>,
    completion: Option<CompletionPolicy>,
    #[serde(default)]
    assistant: FileAssistantConfig,
    catalog: Option<FileCatalogConfig>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct FileAssistantConfig {
    enabled: Option<bool>,
    endpoint: Option<String>,
    model: Option<String>,
    temperature: Option<f32>,
    timeout_secs: Option<u64>,
    rephrase: Option<bool>,
    selection: Option<SelectionStrategy>,
    max_selection_attempts: Option<u32>,
    history_window: Option<usize>,
    max_reply_chars: Option<usize>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct FileCatalogConfig {
    preset: Option<CatalogPreset>,
    mandatory: Option<Vec<String>>,
    optional: Option<Vec<String>>,
}

/// Loads, merges and validates the configuration.
pub fn load_config(explicit: Option<&Path>, overrides: &ConfigOverrides) -> Result<BotConfig> {
    let mut config = BotConfig::default();

    match explicit {
        Some(path) => {
            let expanded = PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned());
            info!("Loading configuration from: {}", expanded.display());
            let file = load_file_config(&expanded)?;
            apply_file_config(&mut config, file)
                .with_context(|| format!("Invalid configuration in {}", expanded.display()))?;
        }
        None => {
            if let Some(path) = user_config_path() {
                info!("Loading user configuration from: {}", path.display());
                let file = load_file_config(&path)?;
                apply_file_config(&mut config, file)
                    .with_context(|| format!("Invalid configuration in {}", path.display()))?;
            }
            if let Some(path) = find_project_config_path()? {
                info!("Loading project configuration from: {}", path.display());
                let file = load_file_config(&path)?;
                apply_file_config(&mut config, file)
                    .with_context(|| format!("Invalid configuration in {}", path.display()))?;
            }
        }
    }

    apply_overrides(&mut config, overrides);
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

fn user_config_path() -> Option<PathBuf> {
    match ProjectDirs::from("com", "Hotelbot", "hotelbot") {
        Some(proj_dirs) => {
            let config_path = proj_dirs.config_dir().join("config.toml");
            if config_path.is_file() {
                Some(config_path)
            } else {
                debug!(
                    "User configuration file not found at {}",
                    config_path.display()
                );
                None
            }
        }
        None => {
            warn!("Could not determine user config directory.");
            None
        }
    }
}

fn find_project_config_path() -> Result<Option<PathBuf>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    Ok(find_project_config_from(&current_dir))
}

fn find_project_config_from(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn apply_file_config(config: &mut BotConfig, file: FileConfig) -> Result<()> {
    if let Some(name) = file.hotel_name {
        config.hotel_name = name;
    }
    if let Some(show) = file.show_progress {
        config.show_progress = show;
    }
    if let Some(completion) = file.completion {
        config.completion = completion;
    }

    let assistant = &mut config.assistant;
    let file_assistant = file.assistant;
    if let Some(v) = file_assistant.enabled {
        assistant.enabled = v;
    }
    if let Some(v) = file_assistant.endpoint {
        assistant.endpoint = normalize_endpoint(&v);
    }
    if let Some(v) = file_assistant.model {
        assistant.model = v;
    }
    if let Some(v) = file_assistant.temperature {
        assistant.temperature = v;
    }
    if let Some(v) = file_assistant.timeout_secs {
        assistant.timeout_secs = v;
    }
    if let Some(v) = file_assistant.rephrase {
        assistant.rephrase = v;
    }
    if let Some(v) = file_assistant.selection {
        assistant.selection = v;
    }
    if let Some(v) = file_assistant.max_selection_attempts {
        assistant.max_selection_attempts = v;
    }
    if let Some(v) = file_assistant.history_window {
        assistant.history_window = v;
    }
    if let Some(v) = file_assistant.max_reply_chars {
        assistant.max_reply_chars = v;
    }

    if let Some(catalog) = file.catalog {
        config.catalog = build_catalog(catalog)?;
    }
    Ok(())
}

fn build_catalog(file: FileCatalogConfig) -> Result<Catalog> {
    match (file.mandatory, file.optional, file.preset) {
        (Some(mandatory), optional, preset) => {
            if preset.is_some() {
                warn!("Catalog preset ignored because explicit question lists are configured.");
            }
            Catalog::new(mandatory, optional.unwrap_or_default())
        }
        (None, Some(_), _) => Err(anyhow!(BookingError::Config(
            "catalog.optional requires catalog.mandatory to be set.".to_string()
        ))),
        (None, None, Some(CatalogPreset::Extended)) => Ok(Catalog::extended()),
        (None, None, _) => Ok(Catalog::standard()),
    }
}

fn apply_overrides(config: &mut BotConfig, overrides: &ConfigOverrides) {
    if let Some(name) = &overrides.hotel_name {
        config.hotel_name = name.clone();
    }
    if overrides.no_progress {
        config.show_progress = false;
    }
    if let Some(completion) = overrides.completion {
        config.completion = completion;
    }
    if overrides.no_llm {
        config.assistant.enabled = false;
    }
    if overrides.no_rephrase {
        config.assistant.rephrase = false;
    }
    if let Some(selection) = overrides.selection {
        config.assistant.selection = selection;
    }
    if let Some(model) = &overrides.model {
        config.assistant.model = model.clone();
    }
    if let Some(endpoint) = &overrides.endpoint {
        config.assistant.endpoint = normalize_endpoint(endpoint);
    }
    if let Some(secs) = overrides.timeout_secs {
        config.assistant.timeout_secs = secs;
    }
}

/// `OLLAMA_HOST` is commonly set as `host:port`; assume plain HTTP then.
fn normalize_endpoint(endpoint: &str) -> String {
    let trimmed = endpoint.trim().trim_end_matches('/');
    if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    }
}

fn config_error(msg: String) -> Result<()> {
    Err(anyhow!(BookingError::Config(msg)))
}

fn validate_config(config: &BotConfig) -> Result<()> {
    debug!("Validating final configuration...");
    if config.hotel_name.trim().is_empty() {
        return config_error("Hotel name cannot be empty.".to_string());
    }
    let assistant = &config.assistant;
    if !(0.0..=2.0).contains(&assistant.temperature) {
        return config_error(format!(
            "Temperature must be between 0 and 2, got {}.",
            assistant.temperature
        ));
    }
    if assistant.timeout_secs == 0 {
        return config_error("timeout_secs must be at least 1.".to_string());
    }
    if assistant.max_selection_attempts == 0 {
        return config_error("max_selection_attempts must be at least 1.".to_string());
    }
    if assistant.history_window == 0 {
        return config_error("history_window must be at least 1.".to_string());
    }
    if assistant.max_reply_chars < 5 {
        return config_error("max_reply_chars must be at least 5.".to_string());
    }
    if !(assistant.endpoint.starts_with("http://") || assistant.endpoint.starts_with("https://"))
    {
        return config_error(format!(
            "Invalid endpoint '{}'. Expected an http:// or https:// URL.",
            assistant.endpoint
        ));
    }
    debug!("Configuration validation successful.");
    Ok(())
}

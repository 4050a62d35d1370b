//! Top-level error types for WeatherDeck.
//!
//! Component crates carry their own narrow error enums (lookup, storage,
//! search). This module holds the errors that can stop the application from
//! starting at all, each with a message suitable for showing to the user.

use thiserror::Error;

/// Top-level application error type.
///
/// Use `user_message()` to get a terminal-appropriate message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Service-level errors (weather client, storage) mapped from component crates.
    #[error("Service error: {0}")]
    Service(String),
}

impl AppError {
    /// Returns a user-friendly message suitable for display in the terminal.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Config(e) => e.user_message(),
            AppError::Service(_) => "A service could not be started. Check your settings.",
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),

    #[error("Failed to read configuration: {0}")]
    ReadFailed(String),

    #[error("Missing required setting: {0}")]
    MissingSetting(String),

    #[error("Failed to write configuration: {0}")]
    WriteFailed(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
            ConfigError::ReadFailed(_) => "Could not read the configuration file. Check its permissions.",
            ConfigError::MissingSetting(_) => "A required setting is missing. Check your settings.",
            ConfigError::WriteFailed(_) => "Could not save the default configuration file.",
        }
    }
}

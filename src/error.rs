use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Environment error: {0}")]
    #[diagnostic(code(quickevent::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(quickevent::config))]
    Config(String),

    #[error("Invitee storage error: {0}")]
    #[diagnostic(code(quickevent::storage))]
    Storage(String),

    #[error("Calendar automation error: {0}")]
    #[diagnostic(code(quickevent::automation))]
    Automation(String),

    #[error(transparent)]
    #[diagnostic(code(quickevent::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(quickevent::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(quickevent::other))]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type AppResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Missing environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create storage errors
pub fn storage_error(message: &str) -> Error {
    Error::Storage(message.to_string())
}

/// Helper to create calendar automation errors
pub fn automation_error(message: &str) -> Error {
    Error::Automation(message.to_string())
}

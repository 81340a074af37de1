//! Error types for wifi-aware-native
//!
//! Event processing itself never fails; these cover the diagnostic surface,
//! configuration and logging setup.

use aware_hal::RevisionParseError;

/// Errors from the diagnostic command surface
#[derive(Debug, thiserror::Error)]
pub enum DiagnosticError {
    #[error("Unknown 'native_cb' command '{0}'")]
    UnknownCommand(String),

    #[error("Unknown option to '{command}': {detail}")]
    InvalidArguments { command: String, detail: String },

    #[error("Missing 'native_cb' command")]
    MissingCommand,

    #[error("Failed to write diagnostic output: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to render diagnostic output: {0}")]
    Render(#[from] serde_json::Error),
}

/// Errors from building or validating [`crate::AdapterConfig`]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid HAL revision: {0}")]
    InvalidRevision(#[from] RevisionParseError),

    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Logging setup errors
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracingInit(String),

    #[error("Invalid environment variable: {0}")]
    InvalidEnv(String),
}

//! Error types for git-changelog

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using the crate [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for git-changelog operations
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Output-related errors
    #[error(transparent)]
    Output(#[from] OutputError),

    /// Rendering failed inside the changelog engine
    #[error("Failed to render changelog: {0}")]
    Render(String),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Neither `--stdout` nor `--output-file` was requested
    #[error("You must supply an output, --output-file <filename> or --stdout")]
    MissingOutputSink,

    /// Settings file could not be opened or read
    #[error("Cannot read settings file {path}: {source}")]
    SettingsFileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid JSON settings document
    #[error("Invalid JSON settings in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Invalid YAML settings document
    #[error("Invalid YAML settings in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Invalid TOML settings document
    #[error("Invalid TOML settings in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },
}

/// Output-related errors
#[derive(Debug, Error)]
pub enum OutputError {
    /// Writing to a sink failed
    #[error("Failed to write to {sink}: {source}")]
    WriteFailed {
        sink: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a render error with a message
    pub fn render<S: Into<String>>(msg: S) -> Self {
        Self::Render(msg.into())
    }
}

impl ConfigError {
    /// Shorthand for [`ConfigError::InvalidValue`]
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}

use miette::{Diagnostic, Result};
use thiserror::Error;

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Environment error: {0}")]
    #[diagnostic(code(iqamasync::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(iqamasync::config))]
    Config(String),

    #[error("Authentication error: {0}")]
    #[diagnostic(code(iqamasync::auth))]
    Auth(String),

    #[error("Schedule feed error: {0}")]
    #[diagnostic(code(iqamasync::feed))]
    Feed(String),

    #[error("Google Calendar API error: {0}")]
    #[diagnostic(code(iqamasync::google_calendar))]
    GoogleCalendar(String),

    #[error(transparent)]
    #[diagnostic(code(iqamasync::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(iqamasync::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(iqamasync::other))]
    Other(String),
}

// Implement From for TOML deserialization errors
impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

// Implement From for JSON (de)serialization errors
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

// Implement From for CSV decode errors
impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Feed(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type SyncResult<T> = Result<T, Error>;

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Missing environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create authentication errors
pub fn auth_error(message: &str) -> Error {
    Error::Auth(message.to_string())
}

/// Helper to create schedule feed errors
pub fn feed_error(message: &str) -> Error {
    Error::Feed(message.to_string())
}

/// Helper to create Google Calendar errors
pub fn google_calendar_error(message: &str) -> Error {
    Error::GoogleCalendar(message.to_string())
}

/// Helper to create other errors
#[allow(dead_code)]
pub fn other_error(message: &str) -> Error {
    Error::Other(message.to_string())
}

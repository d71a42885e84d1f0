//! Shared domain errors

use thiserror::Error;

/// A dialogue timing string that does not parse
#[derive(Debug, Clone, Error)]
#[error("Invalid duration format: \"{input}\". Expected format: <number>ms, <number>s, <number>m, or <number>m<number>s (e.g., 300ms, 8s, 1m30s)")]
pub struct DurationParseError {
    pub input: String,
}

/// A screen name that does not match any banking screen
#[derive(Debug, Clone, Error)]
#[error("Invalid screen: \"{input}\". Valid screens are: login, signup, home, contacts, payment, history, balance, profile")]
pub struct InvalidScreenError {
    pub input: String,
}

/// Settings file problems
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Could not read the config file: {0}")]
    Read(String),

    #[error("The config file is not valid TOML: {0}")]
    Parse(String),

    #[error("Could not write the config file: {0}")]
    Write(String),

    #[error("Invalid config value for '{key}': {message}")]
    Validation { key: String, message: String },

    #[error("A config file already exists at: {0}")]
    AlreadyExists(String),
}

/// A catalog file whose JSON does not describe banks and contacts
#[derive(Debug, Clone, Error)]
#[error("The catalog file is not valid JSON: {0}")]
pub struct CatalogParseError(pub String);

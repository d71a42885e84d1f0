//! Configuration storage port interface

use async_trait::async_trait;
use std::path::PathBuf;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Port for the persisted shell settings: server URL, dialogue timing,
/// speech tool and catalog overrides.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Load the stored settings. A missing file is not an error; it
    /// loads as a config with every field unset.
    async fn load(&self) -> Result<AppConfig, ConfigError>;

    /// Persist the settings, creating the file if needed.
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;

    /// Where the settings live on disk.
    fn path(&self) -> PathBuf;

    /// Check whether a settings file exists yet.
    fn exists(&self) -> bool;

    /// Write a fresh settings file with the defaults.
    /// Refuses to touch an existing file.
    async fn init(&self) -> Result<(), ConfigError>;
}

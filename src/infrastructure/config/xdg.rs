//! TOML settings store under the user's config directory

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Settings store at `{config_dir}/voicepay/config.toml`
pub struct XdgConfigStore {
    path: PathBuf,
}

impl XdgConfigStore {
    pub fn new() -> Self {
        let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("~/.config"));
        Self {
            path: base.join("voicepay").join("config.toml"),
        }
    }

    /// Store at an explicit file path, for tests and overrides
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Default for XdgConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfigStore for XdgConfigStore {
    async fn load(&self) -> Result<AppConfig, ConfigError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            // No file yet means nothing has been configured
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(AppConfig::empty()),
            Err(e) => return Err(ConfigError::Read(e.to_string())),
        };

        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        let content =
            toml::to_string_pretty(config).map_err(|e| ConfigError::Write(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ConfigError::Write(e.to_string()))?;
        }

        fs::write(&self.path, content)
            .await
            .map_err(|e| ConfigError::Write(e.to_string()))
    }

    fn path(&self) -> PathBuf {
        self.path.clone()
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }

    async fn init(&self) -> Result<(), ConfigError> {
        if self.exists() {
            return Err(ConfigError::AlreadyExists(
                self.path.to_string_lossy().to_string(),
            ));
        }

        self.save(&AppConfig::defaults()).await
    }
}

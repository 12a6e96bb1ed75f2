//! Configuration management for Vox

pub mod schema;

pub use schema::Config;

use crate::error::{VoxError, VoxResult};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Locates, loads and writes the config file
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Use `path` if given, else `<config dir>/vox/config.toml`
    pub fn resolve(path: Option<PathBuf>) -> Self {
        let config_path = path.unwrap_or_else(|| {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("vox")
                .join("config.toml")
        });
        Self { config_path }
    }

    /// Default handle cache location under the user's state directory
    pub fn default_cache_path() -> PathBuf {
        dirs::state_dir()
            .or_else(dirs::data_local_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vox")
            .join("handles.json")
    }

    /// Resolve the handle cache path: explicit override, then config, then default
    pub fn cache_path(config: &Config, override_path: Option<&Path>) -> PathBuf {
        override_path
            .map(Path::to_path_buf)
            .or_else(|| config.cache.path.clone())
            .unwrap_or_else(Self::default_cache_path)
    }

    /// Load configuration; a missing file yields defaults
    pub async fn load(&self) -> VoxResult<Config> {
        let content = match fs::read_to_string(&self.config_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No config at {}, using defaults", self.config_path.display());
                return Ok(Config::default());
            }
            Err(e) => {
                return Err(VoxError::io(
                    format!("reading config from {}", self.config_path.display()),
                    e,
                ))
            }
        };

        toml::from_str(&content).map_err(|e| VoxError::ConfigInvalid {
            path: self.config_path.clone(),
            reason: e.to_string(),
        })
    }

    /// Write `config` as TOML, creating the directory if needed
    pub async fn save(&self, config: &Config) -> VoxResult<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| VoxError::ConfigDirCreate {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }

        let content = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, content).await.map_err(|e| {
            VoxError::io(format!("writing config to {}", self.config_path.display()), e)
        })?;

        info!("Configuration saved to {}", self.config_path.display());
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_default_when_missing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nonexistent.toml");
        let manager = ConfigManager::resolve(Some(path));

        let config = manager.load().await.unwrap();
        assert_eq!(config.bot.poll_timeout_secs, 30);
    }

    #[tokio::test]
    async fn save_and_load_roundtrip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.toml");
        let manager = ConfigManager::resolve(Some(path));

        let mut config = Config::default();
        config.voice.caption = "Kolomoiskiy".to_string();

        manager.save(&config).await.unwrap();
        let loaded = manager.load().await.unwrap();

        assert_eq!(loaded.voice.caption, "Kolomoiskiy");
    }

    #[tokio::test]
    async fn load_invalid_config_errors() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[bot\napi_url = ").unwrap();
        let manager = ConfigManager::resolve(Some(path));

        let err = manager.load().await.unwrap_err();
        assert!(matches!(err, VoxError::ConfigInvalid { .. }));
    }

    #[tokio::test]
    async fn load_directory_is_io_error() {
        let temp = TempDir::new().unwrap();
        let manager = ConfigManager::resolve(Some(temp.path().to_path_buf()));

        let err = manager.load().await.unwrap_err();
        assert!(matches!(err, VoxError::Io { .. }));
    }

    #[test]
    fn resolve_defaults_to_config_dir() {
        let manager = ConfigManager::resolve(None);
        assert!(manager.path().ends_with("vox/config.toml"));
    }

    #[test]
    fn cache_path_precedence() {
        let mut config = Config::default();
        assert_eq!(
            ConfigManager::cache_path(&config, None),
            ConfigManager::default_cache_path()
        );

        config.cache.path = Some(PathBuf::from("/etc/vox/handles.json"));
        assert_eq!(
            ConfigManager::cache_path(&config, None),
            PathBuf::from("/etc/vox/handles.json")
        );

        let override_path = PathBuf::from("/tmp/override.json");
        assert_eq!(
            ConfigManager::cache_path(&config, Some(&override_path)),
            override_path
        );
    }
}

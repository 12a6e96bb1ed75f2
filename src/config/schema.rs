//! Configuration schema for Vox
//!
//! Configuration is stored at `~/.config/vox/config.toml`. The bot token is
//! deliberately not part of it; see `BOT_TOKEN`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Handle cache settings
    pub cache: CacheConfig,

    /// Bot API settings
    pub bot: BotConfig,

    /// The voice clip served by /voice
    pub voice: VoiceConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

/// Handle cache configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Cache file location (default: `<state dir>/vox/handles.json`)
    pub path: Option<PathBuf>,
}

/// Bot API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    /// Bot API base URL
    pub api_url: String,

    /// Long-poll timeout for getUpdates
    pub poll_timeout_secs: u32,

    /// Per-request timeout for all other calls
    pub request_timeout_secs: u64,

    /// Pause after a failed poll before trying again
    pub retry_delay_secs: u64,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.telegram.org".to_string(),
            poll_timeout_secs: 30,
            request_timeout_secs: 60,
            retry_delay_secs: 5,
        }
    }
}

/// Voice clip configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    /// Path of the clip to send; its file name is the cache key
    pub resource: PathBuf,

    /// Caption sent with the clip
    pub caption: String,

    /// Appended to the caption when the clip is re-sent from a cached handle
    pub cached_suffix: String,

    /// Reply to /start
    pub greeting: String,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            resource: PathBuf::from("voice.ogg"),
            caption: "Voice".to_string(),
            cached_suffix: "(c)".to_string(),
            greeting: "Hi! Send /voice to get your voice message 🎙️".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("[general]"));
        assert!(toml.contains("[bot]"));
        assert!(toml.contains("[voice]"));
    }

    #[test]
    fn config_deserializes_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.bot.api_url, "https://api.telegram.org");
        assert!(config.cache.path.is_none());
    }

    #[test]
    fn config_deserializes_partial() {
        let toml = r#"
            [cache]
            path = "/var/lib/vox/cache.json"

            [voice]
            resource = "clip.ogg"
        "#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(
            config.cache.path,
            Some(PathBuf::from("/var/lib/vox/cache.json"))
        );
        assert_eq!(config.voice.resource, PathBuf::from("clip.ogg"));
        assert_eq!(config.voice.cached_suffix, "(c)"); // default preserved
    }
}

//! Configuration System
//!
//! UI settings loaded from the TOML file embedded at build time, with
//! browser local storage overrides.

use serde::Deserialize;
use std::time::Duration;

use crate::api::client::{API_URL_STORAGE_KEY, DEFAULT_API_BASE};
use crate::overlay::OverlayMedia;

/// Config file compiled into the bundle
pub const EMBEDDED_CONFIG: &str = include_str!("../config/rewards.toml");

/// Local storage key overriding the log filter
pub const LOG_LEVEL_STORAGE_KEY: &str = "rewards_log_level";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub feed: FeedConfig,

    #[serde(default)]
    pub overlay: OverlayConfig,

    #[serde(default)]
    pub chart: ChartConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend location
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Good-things feed settings
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    #[serde(default = "default_others_limit")]
    pub others_limit: u32,
}

fn default_others_limit() -> u32 {
    5
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            others_limit: default_others_limit(),
        }
    }
}

/// Celebration overlay settings
#[derive(Debug, Clone, Deserialize)]
pub struct OverlayConfig {
    #[serde(default = "default_fallback_secs")]
    pub fallback_secs: u64,

    #[serde(default = "default_video_src")]
    pub video_src: String,

    #[serde(default = "default_poster")]
    pub poster: Option<String>,
}

fn default_fallback_secs() -> u64 {
    70
}

fn default_video_src() -> String {
    "assets/gacha.mp4".to_string()
}

fn default_poster() -> Option<String> {
    Some("assets/gacha.jpg".to_string())
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            fallback_secs: default_fallback_secs(),
            video_src: default_video_src(),
            poster: default_poster(),
        }
    }
}

impl OverlayConfig {
    pub fn fallback(&self) -> Duration {
        Duration::from_secs(self.fallback_secs)
    }

    pub fn media(&self) -> OverlayMedia {
        OverlayMedia::new(self.video_src.clone(), self.poster.as_deref())
    }
}

/// Sleep chart axes
#[derive(Debug, Clone, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_min_minutes")]
    pub min_minutes: i32,

    #[serde(default = "default_max_minutes")]
    pub max_minutes: i32,

    #[serde(default = "default_duration_max")]
    pub duration_suggested_max: f64,
}

fn default_min_minutes() -> i32 {
    -360 // 18:00 the previous day
}

fn default_max_minutes() -> i32 {
    24 * 60
}

fn default_duration_max() -> f64 {
    10.0
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            min_minutes: default_min_minutes(),
            max_minutes: default_max_minutes(),
            duration_suggested_max: default_duration_max(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directives
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "rewards_ui=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl UiConfig {
    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let mut config: UiConfig = toml::from_str(content).map_err(|e| ConfigError::Parse {
            error: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Embedded configuration with local storage overrides
    pub fn load_default() -> Result<Self, ConfigError> {
        let mut config = Self::from_toml(EMBEDDED_CONFIG)?;
        config.apply_storage_overrides();
        Ok(config)
    }

    fn validate(&mut self) -> Result<(), ConfigError> {
        if self.chart.min_minutes >= self.chart.max_minutes {
            return Err(ConfigError::Invalid(format!(
                "chart.min_minutes ({}) must be below chart.max_minutes ({})",
                self.chart.min_minutes, self.chart.max_minutes
            )));
        }
        if self.feed.others_limit == 0 {
            return Err(ConfigError::Invalid(
                "feed.others_limit must be at least 1".to_string(),
            ));
        }
        self.api.base_url = self.api.base_url.trim_end_matches('/').to_string();
        Ok(())
    }

    /// Apply browser local storage overrides to an existing config
    fn apply_storage_overrides(&mut self) {
        let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten())
        else {
            return;
        };

        if let Ok(Some(url)) = storage.get_item(API_URL_STORAGE_KEY) {
            if !url.trim().is_empty() {
                self.api.base_url = url.trim_end_matches('/').to_string();
            }
        }
        if let Ok(Some(level)) = storage.get_item(LOG_LEVEL_STORAGE_KEY) {
            if !level.trim().is_empty() {
                self.logging.level = level;
            }
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {error}")]
    Parse { error: String },

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_config_parses() {
        let config = UiConfig::from_toml(EMBEDDED_CONFIG).unwrap();
        assert_eq!(config.api.base_url, "/api");
        assert_eq!(config.feed.others_limit, 5);
        assert_eq!(config.overlay.fallback(), Duration::from_secs(70));
        assert_eq!(config.chart.min_minutes, -360);
    }

    #[test]
    fn test_defaults_for_missing_sections() {
        let config = UiConfig::from_toml("[feed]\nothers_limit = 12\n").unwrap();
        assert_eq!(config.feed.others_limit, 12);
        assert_eq!(config.overlay.video_src, "assets/gacha.mp4");
        assert_eq!(config.logging.level, "rewards_ui=info");
        assert_eq!(
            config.overlay.media(),
            OverlayMedia::new("assets/gacha.mp4", Some("assets/gacha.jpg"))
        );
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            UiConfig::from_toml("[api\n"),
            Err(ConfigError::Parse { .. })
        ));
        assert!(matches!(
            UiConfig::from_toml("[chart]\nmin_minutes = 100\nmax_minutes = 50\n"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let config = UiConfig::from_toml("[api]\nbase_url = \"http://localhost:8000/api/\"\n").unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8000/api");
    }
}

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable pointing at an alternative config file
pub const CONFIG_ENV: &str = "AEM_PREP_CONFIG";

pub const DEFAULT_TRANSLATION_ENDPOINT: &str = "https://api.mymemory.translated.net/get";

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // Translation
    pub translation_endpoint: String,

    // Speech
    pub speech_engine: String,
    pub speech_rate: f32,
    pub preferred_voice: String,

    // Meta
    pub log_level: String,

    // Data
    pub preferences_path: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            translation_endpoint: DEFAULT_TRANSLATION_ENDPOINT.to_string(),
            speech_engine: "auto".to_string(),
            speech_rate: crate::speech::DEFAULT_RATE,
            preferred_voice: String::new(),
            log_level: "INFO".to_string(),
            preferences_path: dirs::data_dir()
                .unwrap_or_default()
                .join("aem-prep/preferences.json")
                .to_string_lossy()
                .to_string(),
        }
    }
}

impl Config {
    /// Load config from the default location, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(config_path)?;
        match serde_json::from_str(&content) {
            Ok(config) => Ok(config),
            Err(e) => {
                // Graceful degradation: keep the broken file around for inspection
                tracing::warn!("⚠️ Config file corrupted or invalid, using defaults: {}", e);
                let backup_path = config_path.with_extension("json.corrupt");
                let _ = std::fs::rename(config_path, &backup_path);
                Ok(Self::default())
            }
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn preferences_path(&self) -> PathBuf {
        PathBuf::from(&self.preferences_path)
    }
}

pub fn config_path() -> PathBuf {
    if let Some(custom) = std::env::var_os(CONFIG_ENV) {
        return PathBuf::from(custom);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("aem-prep")
        .join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.translation_endpoint, DEFAULT_TRANSLATION_ENDPOINT);
        assert_eq!(config.speech_engine, "auto");
        assert_eq!(config.speech_rate, 1.0);
        assert!(config.preferences_path.ends_with("preferences.json"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "speech_rate": 1.5 }"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.speech_rate, 1.5);
        assert_eq!(config.log_level, "INFO");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.json");

        let mut config = Config::default();
        config.preferred_voice = "Spanish_(Spain)".to_string();
        config.save_to(&path).unwrap();

        let restored = Config::load_from(&path).unwrap();
        assert_eq!(restored.preferred_voice, "Spanish_(Spain)");
    }

    #[test]
    fn test_config_corrupt_json_handling() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not valid json").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.speech_engine, "auto");
        assert!(!path.exists());
        assert!(dir.path().join("config.json.corrupt").exists());
    }
}

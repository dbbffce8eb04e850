use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::remember::RememberBackend;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tui: TuiConfig,
    pub data: DataConfig,
    pub auth: AuthConfig,
}

/// TUI-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Tick interval in milliseconds for the event loop.
    pub tick_rate_ms: u64,
    /// Capture mouse events in the terminal.
    pub mouse_enabled: bool,
}

/// Data directory and seed configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Override the default data directory (logs live here).
    pub data_dir: Option<PathBuf>,
    /// JSON file replacing the built-in mock records.
    pub seed_file: Option<PathBuf>,
}

/// Login form configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Where "remember me" credentials are kept.
    pub remember_backend: RememberBackend,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 100,
            mouse_enabled: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from `~/.config/budstech-admin/config.toml`.
    /// Returns `Default` if the file is missing or unparseable.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &std::path::Path) -> Self {
        match std::fs::read_to_string(config_path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    log::info!("Loaded config from {}", config_path.display());
                    config
                }
                Err(e) => {
                    log::warn!(
                        "Failed to parse config at {}: {e}; using defaults",
                        config_path.display()
                    );
                    Self::default()
                }
            },
            Err(_) => {
                log::debug!(
                    "No config file at {}; using defaults",
                    config_path.display()
                );
                Self::default()
            }
        }
    }

    /// Resolved data directory (override or XDG default).
    pub fn data_dir(&self) -> PathBuf {
        self.data.data_dir.clone().unwrap_or_else(default_data_dir)
    }

    pub fn tick_rate(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tui.tick_rate_ms.max(10))
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("budstech-admin").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}

pub(crate) fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("budstech-admin"))
        .unwrap_or_else(|| PathBuf::from("data"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.tui.tick_rate_ms, 100);
        assert!(!config.tui.mouse_enabled);
        assert!(config.data.data_dir.is_none());
        assert!(config.data.seed_file.is_none());
        assert_eq!(config.auth.remember_backend, RememberBackend::Keyring);
    }

    #[test]
    fn test_config_load_missing_file() {
        let config = AppConfig::load_from(std::path::Path::new("/nonexistent/config.toml"));
        assert_eq!(config.tui.tick_rate_ms, 100);
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[auth]\nremember_backend = \"memory\"\n\n[data]\nseed_file = \"/tmp/seed.json\"\n",
        )
        .unwrap();

        let config = AppConfig::load_from(&path);
        assert_eq!(config.auth.remember_backend, RememberBackend::Memory);
        assert_eq!(config.data.seed_file, Some(PathBuf::from("/tmp/seed.json")));
        assert_eq!(config.tui.tick_rate_ms, 100);
    }

    #[test]
    fn test_unparseable_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "tui = [not toml").unwrap();
        let config = AppConfig::load_from(&path);
        assert_eq!(config.auth.remember_backend, RememberBackend::Keyring);
    }

    #[test]
    fn test_data_dir_default() {
        let config = AppConfig::default();
        let dir = config.data_dir();
        assert!(dir.to_string_lossy().contains("budstech-admin") || dir == PathBuf::from("data"));
    }

    #[test]
    fn test_data_dir_override() {
        let mut config = AppConfig::default();
        config.data.data_dir = Some(PathBuf::from("/tmp/custom"));
        assert_eq!(config.data_dir(), PathBuf::from("/tmp/custom"));
    }

    #[test]
    fn test_tick_rate_floor() {
        let mut config = AppConfig::default();
        config.tui.tick_rate_ms = 0;
        assert_eq!(config.tick_rate(), std::time::Duration::from_millis(10));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = AppConfig::default();
        let serialized = toml::to_string(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized.tui.tick_rate_ms, config.tui.tick_rate_ms);
        assert_eq!(deserialized.auth.remember_backend, config.auth.remember_backend);
    }
}

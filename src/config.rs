use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr};
use serde::Deserialize;

use crate::theme::ThemeConfig;

const APP_DIR: &str = "reminder-tui";

/// Contents of `<config_dir>/reminder-tui/config.toml`. Every table is optional.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Reminder file. Relative paths resolve against the working directory.
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("events.json"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: None,
        }
    }
}

impl LoggingConfig {
    pub fn log_dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join(APP_DIR)
                .join("logs")
        })
    }
}

impl Config {
    /// Load the user config, or defaults when there is none.
    pub fn load() -> Result<Self> {
        match config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&content).wrap_err_with(|| format!("invalid config {}", path.display()))
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn empty_file_gives_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.storage.path, PathBuf::from("events.json"));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn partial_tables_keep_other_defaults() {
        let config: Config = toml::from_str(
            r#"
            [storage]
            path = "/tmp/my-reminders.json"

            [theme]
            preset = "gruvbox"
            "#,
        )
        .unwrap();
        assert_eq!(config.storage.path, PathBuf::from("/tmp/my-reminders.json"));
        assert_eq!(config.logging, LoggingConfig::default());
        assert_eq!(config.theme.preset.as_deref(), Some("gruvbox"));
    }

    #[test]
    fn explicit_log_dir_wins() {
        let logging = LoggingConfig {
            dir: Some(PathBuf::from("/var/log/reminders")),
            ..LoggingConfig::default()
        };
        assert_eq!(logging.log_dir(), PathBuf::from("/var/log/reminders"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[storage\npath = 3").unwrap();
        assert!(Config::from_file(&path).is_err());
    }
}

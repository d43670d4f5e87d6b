//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/inventory/config.toml)
//! 3. Environment variables (INVENTORY_* prefix)
//!
//! Environment variables take precedence over config file values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::contract::DATABASE_NAME;

/// Environment variable prefix
const ENV_PREFIX: &str = "INVENTORY";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the product database
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Write logs here instead of stderr
    #[serde(default)]
    pub log_file: Option<PathBuf>,

    /// Log level for inventory crates (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_file: None,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Load configuration from default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (INVENTORY_DATA_DIR, INVENTORY_LOG_FILE, INVENTORY_LOG_LEVEL)
    /// 2. Config file (~/.config/inventory/config.toml or INVENTORY_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load from `--config` when given, otherwise from the default location
    pub fn load_with_cli_override(path: Option<&PathBuf>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        config.ensure_data_dir()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (useful for testing)
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(toml_content).context("Failed to parse config TOML")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        // INVENTORY_DATA_DIR
        if let Ok(val) = std::env::var(format!("{}_DATA_DIR", ENV_PREFIX)) {
            self.data_dir = PathBuf::from(val);
        }

        // INVENTORY_LOG_FILE
        if let Ok(val) = std::env::var(format!("{}_LOG_FILE", ENV_PREFIX)) {
            self.log_file = if val.is_empty() {
                None
            } else {
                Some(PathBuf::from(val))
            };
        }

        // INVENTORY_LOG_LEVEL
        if let Ok(val) = std::env::var(format!("{}_LOG_LEVEL", ENV_PREFIX)) {
            if !val.is_empty() {
                self.log_level = val.to_lowercase();
            }
        }
    }

    /// Ensure data directory exists
    fn ensure_data_dir(&self) -> Result<()> {
        if !self.data_dir.exists() {
            std::fs::create_dir_all(&self.data_dir)
                .with_context(|| format!("Failed to create data directory: {:?}", self.data_dir))?;
        }
        Ok(())
    }

    /// Save configuration to the default file
    pub fn save(&self) -> Result<()> {
        self.save_to_path(&Self::config_file_path())
    }

    /// Save configuration to a specific file
    pub fn save_to_path(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;
        Ok(())
    }

    /// Get the config file path
    ///
    /// Can be overridden with INVENTORY_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("inventory")
            .join("config.toml")
    }

    /// Get the path to the SQLite database
    pub fn sqlite_path(&self) -> PathBuf {
        self.data_dir.join(DATABASE_NAME)
    }
}

/// Get the default data directory
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("inventory")
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Mutex to serialize tests that touch environment variables
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Guard that locks env access and saves/restores env vars
    struct EnvGuard<'a> {
        _lock: std::sync::MutexGuard<'a, ()>,
        saved: Vec<(String, Option<String>)>,
    }

    impl<'a> EnvGuard<'a> {
        fn new(vars: &[&str]) -> Self {
            let lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
            let saved = vars
                .iter()
                .map(|&name| (name.to_string(), env::var(name).ok()))
                .collect();
            for name in vars {
                env::remove_var(name);
            }
            Self { _lock: lock, saved }
        }
    }

    impl Drop for EnvGuard<'_> {
        fn drop(&mut self) {
            for (name, value) in &self.saved {
                match value {
                    Some(v) => env::set_var(name, v),
                    None => env::remove_var(name),
                }
            }
        }
    }

    const ENV_VARS: &[&str] = &[
        "INVENTORY_DATA_DIR",
        "INVENTORY_LOG_FILE",
        "INVENTORY_LOG_LEVEL",
        "INVENTORY_CONFIG",
    ];

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.log_file.is_none());
        assert_eq!(config.log_level, "warn");
        assert!(config.data_dir.ends_with("inventory"));
    }

    #[test]
    fn test_sqlite_path() {
        let config = Config::default();
        assert!(config.sqlite_path().ends_with("storage.db"));
    }

    #[test]
    fn test_env_override_data_dir() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("INVENTORY_DATA_DIR", "/tmp/inventory-test");
        config.apply_env_overrides();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/inventory-test"));
    }

    #[test]
    fn test_env_override_log_file() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("INVENTORY_LOG_FILE", "/tmp/inventory.log");
        config.apply_env_overrides();
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/inventory.log")));

        // Empty string clears it
        env::set_var("INVENTORY_LOG_FILE", "");
        config.apply_env_overrides();
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_env_override_log_level() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("INVENTORY_LOG_LEVEL", "DEBUG");
        config.apply_env_overrides();
        assert_eq!(config.log_level, "debug");

        env::set_var("INVENTORY_LOG_LEVEL", "");
        config.apply_env_overrides();
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_config_file_path_override() {
        let _guard = EnvGuard::new(ENV_VARS);

        env::set_var("INVENTORY_CONFIG", "/etc/inventory.toml");
        assert_eq!(
            Config::config_file_path(),
            PathBuf::from("/etc/inventory.toml")
        );
    }

    #[test]
    fn test_serialization() {
        let _guard = EnvGuard::new(ENV_VARS);

        let config = Config {
            data_dir: PathBuf::from("/data/inventory"),
            log_file: Some(PathBuf::from("/var/log/inventory.log")),
            log_level: "info".to_string(),
        };

        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("data_dir"));
        assert!(toml_str.contains("log_file"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.data_dir, config.data_dir);
        assert_eq!(parsed.log_file, config.log_file);
        assert_eq!(parsed.log_level, config.log_level);
    }

    #[test]
    fn test_load_from_str() {
        let _guard = EnvGuard::new(ENV_VARS);

        let toml = r#"
            data_dir = "/custom/data"
            log_level = "trace"
        "#;

        let config = Config::load_from_str(toml).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/custom/data"));
        assert_eq!(config.log_level, "trace");
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_load_from_path_missing_file() {
        let _guard = EnvGuard::new(ENV_VARS);
        let temp_dir = TempDir::new().unwrap();
        env::set_var("INVENTORY_DATA_DIR", temp_dir.path().join("data"));

        let path = PathBuf::from("/nonexistent/config.toml");
        let config = Config::load_from_path(&path).unwrap();

        // Defaults, with the data directory created
        assert_eq!(config.log_level, "warn");
        assert!(config.data_dir.exists());
    }

    #[test]
    fn test_save_and_reload() {
        let _guard = EnvGuard::new(ENV_VARS);
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("conf").join("config.toml");

        let config = Config {
            data_dir: temp_dir.path().join("data"),
            log_file: None,
            log_level: "debug".to_string(),
        };
        config.save_to_path(&config_path).unwrap();

        let loaded = Config::load_with_cli_override(Some(&config_path)).unwrap();
        assert_eq!(loaded.data_dir, config.data_dir);
        assert_eq!(loaded.log_level, "debug");
    }
}

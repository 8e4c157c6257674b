//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/todostore/config.yaml)
//! 3. Environment variables (TODOSTORE_* prefix)
//!
//! Command-line flags are applied on top by the binary.

use crate::store::DEFAULT_ITEMS_PER_PAGE;
use eyre::{Context, Result, eyre};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable prefix
const ENV_PREFIX: &str = "TODOSTORE";

const MAX_ITEMS_PER_PAGE: usize = 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Rows shown per page
    #[serde(default = "default_items_per_page")]
    pub items_per_page: usize,

    /// Where CSV exports are written
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,

    /// Seed demo records when the shell starts
    ///
    /// `TODOSTORE_SAMPLE_DATA` accepts `true`/`1`/`yes`/`on` or
    /// `false`/`0`/`no`/`off` (any case); anything else is an error.
    #[serde(default = "default_sample_data")]
    pub sample_data: bool,
}

fn default_items_per_page() -> usize {
    DEFAULT_ITEMS_PER_PAGE
}

fn default_export_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

fn default_sample_data() -> bool {
    true
}

fn parse_flag(val: &str) -> Option<bool> {
    match val.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            items_per_page: default_items_per_page(),
            export_dir: default_export_dir(),
            sample_data: default_sample_data(),
        }
    }
}

impl Config {
    /// Load configuration from the default location and environment
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration from a specific path
    ///
    /// If the file doesn't exist, defaults are used. Environment variables
    /// are applied as overrides either way.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            debug!(path = ?path, "Loading config file");
            let content =
                std::fs::read_to_string(path).with_context(|| format!("Failed to read config file: {:?}", path))?;
            Self::parse(&content).with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML string (useful for testing)
    pub fn load_from_str(yaml: &str) -> Result<Self> {
        let config = Self::parse(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn parse(yaml: &str) -> Result<Self> {
        // An empty document means "all defaults"
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).context("Failed to parse config YAML")
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var(format!("{}_ITEMS_PER_PAGE", ENV_PREFIX)) {
            self.items_per_page = val
                .trim()
                .parse()
                .with_context(|| format!("Invalid {}_ITEMS_PER_PAGE: {}", ENV_PREFIX, val))?;
        }

        if let Ok(val) = std::env::var(format!("{}_EXPORT_DIR", ENV_PREFIX))
            && !val.is_empty()
        {
            self.export_dir = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var(format!("{}_SAMPLE_DATA", ENV_PREFIX)) {
            self.sample_data = parse_flag(&val)
                .ok_or_else(|| eyre!("Invalid {}_SAMPLE_DATA: {} (expected true or false)", ENV_PREFIX, val))?;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.items_per_page == 0 || self.items_per_page > MAX_ITEMS_PER_PAGE {
            return Err(eyre!(
                "items_per_page must be between 1 and {} (got {})",
                MAX_ITEMS_PER_PAGE,
                self.items_per_page
            ));
        }
        Ok(())
    }

    /// Get the config file path
    ///
    /// Can be overridden with the TODOSTORE_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("todostore")
            .join("config.yaml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Serializes tests that touch environment variables
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const ENV_VARS: &[&str] = &[
        "TODOSTORE_ITEMS_PER_PAGE",
        "TODOSTORE_EXPORT_DIR",
        "TODOSTORE_SAMPLE_DATA",
        "TODOSTORE_CONFIG",
    ];

    /// Holds the env lock, clears the vars, and restores them on drop
    struct EnvGuard<'a> {
        _lock: std::sync::MutexGuard<'a, ()>,
        saved: Vec<(String, Option<String>)>,
    }

    impl EnvGuard<'_> {
        fn new() -> Self {
            let lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
            let saved = ENV_VARS
                .iter()
                .map(|name| (name.to_string(), env::var(name).ok()))
                .collect();
            for name in ENV_VARS {
                unsafe { env::remove_var(name) };
            }
            Self { _lock: lock, saved }
        }

        fn set(&self, name: &str, value: &str) {
            unsafe { env::set_var(name, value) };
        }
    }

    impl Drop for EnvGuard<'_> {
        fn drop(&mut self) {
            for (name, value) in &self.saved {
                match value {
                    Some(v) => unsafe { env::set_var(name, v) },
                    None => unsafe { env::remove_var(name) },
                }
            }
        }
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.items_per_page, 10);
        assert!(config.sample_data);
    }

    #[test]
    fn test_load_from_str_full() {
        let config = Config::load_from_str(
            r#"
items_per_page: 25
export_dir: /tmp/exports
sample_data: false
"#,
        )
        .unwrap();

        assert_eq!(config.items_per_page, 25);
        assert_eq!(config.export_dir, PathBuf::from("/tmp/exports"));
        assert!(!config.sample_data);
    }

    #[test]
    fn test_load_from_str_partial_uses_defaults() {
        let config = Config::load_from_str("items_per_page: 5\n").unwrap();
        assert_eq!(config.items_per_page, 5);
        assert!(config.sample_data);
    }

    #[test]
    fn test_empty_document_is_default() {
        let config = Config::load_from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_rejects_zero_page_size() {
        assert!(Config::load_from_str("items_per_page: 0\n").is_err());
        assert!(Config::load_from_str("items_per_page: 5000\n").is_err());
    }

    #[test]
    fn test_rejects_malformed_yaml() {
        assert!(Config::load_from_str("items_per_page: [not a number").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let _guard = EnvGuard::new();
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        std::fs::write(&path, "items_per_page: 3\nsample_data: false\n").unwrap();

        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.items_per_page, 3);
        assert!(!config.sample_data);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let _guard = EnvGuard::new();
        let temp = TempDir::new().unwrap();
        let config = Config::load_from_path(&temp.path().join("missing.yaml")).unwrap();
        assert_eq!(config.items_per_page, 10);
    }

    #[test]
    fn test_env_override_items_per_page() {
        let guard = EnvGuard::new();
        let mut config = Config::default();

        guard.set("TODOSTORE_ITEMS_PER_PAGE", " 25 ");
        config.apply_env_overrides().unwrap();
        assert_eq!(config.items_per_page, 25);

        guard.set("TODOSTORE_ITEMS_PER_PAGE", "lots");
        assert!(config.apply_env_overrides().is_err());
    }

    #[test]
    fn test_env_override_wins_over_file() {
        let guard = EnvGuard::new();
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        std::fs::write(&path, "items_per_page: 3\n").unwrap();

        guard.set("TODOSTORE_ITEMS_PER_PAGE", "7");
        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.items_per_page, 7);

        guard.set("TODOSTORE_ITEMS_PER_PAGE", "0");
        assert!(Config::load_from_path(&path).is_err());
    }

    #[test]
    fn test_env_override_export_dir() {
        let guard = EnvGuard::new();
        let mut config = Config::default();
        let original = config.export_dir.clone();

        // Empty value keeps the current directory
        guard.set("TODOSTORE_EXPORT_DIR", "");
        config.apply_env_overrides().unwrap();
        assert_eq!(config.export_dir, original);

        guard.set("TODOSTORE_EXPORT_DIR", "/tmp/todostore-exports");
        config.apply_env_overrides().unwrap();
        assert_eq!(config.export_dir, PathBuf::from("/tmp/todostore-exports"));
    }

    #[test]
    fn test_env_override_sample_data() {
        let guard = EnvGuard::new();
        let mut config = Config::default();
        assert!(config.sample_data);

        guard.set("TODOSTORE_SAMPLE_DATA", "false");
        config.apply_env_overrides().unwrap();
        assert!(!config.sample_data);

        guard.set("TODOSTORE_SAMPLE_DATA", "YES");
        config.apply_env_overrides().unwrap();
        assert!(config.sample_data);

        guard.set("TODOSTORE_SAMPLE_DATA", "0");
        config.apply_env_overrides().unwrap();
        assert!(!config.sample_data);

        guard.set("TODOSTORE_SAMPLE_DATA", "maybe");
        assert!(config.apply_env_overrides().is_err());
    }

    #[test]
    fn test_config_file_path_override() {
        let guard = EnvGuard::new();
        assert!(Config::config_file_path().ends_with("todostore/config.yaml"));

        guard.set("TODOSTORE_CONFIG", "/etc/todostore.yaml");
        assert_eq!(Config::config_file_path(), PathBuf::from("/etc/todostore.yaml"));
    }
}

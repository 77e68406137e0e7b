//! Configuration loading and management
//!
//! Handles parsing of `taskdeck.toml` from the user configuration directory
//! (or an explicit path). Everything is optional; a missing file yields the
//! defaults.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{FilterKey, SortKey};

/// File name of the configuration inside the config directory.
pub const CONFIG_FILE: &str = "taskdeck.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Override for the data file holding the task collection
    #[serde(default)]
    pub data_file: Option<PathBuf>,

    /// Interface defaults
    #[serde(default)]
    pub ui: UiConfig,
}

/// Interface-related configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Sort key applied on startup
    #[serde(default = "default_sort")]
    pub default_sort: String,

    /// Status filter applied on startup (`All` or a status name)
    #[serde(default = "default_filter")]
    pub default_filter: String,
}

fn default_sort() -> String {
    SortKey::DeadlineAsc.as_str().to_string()
}

fn default_filter() -> String {
    FilterKey::All.as_str().to_string()
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_sort: default_sort(),
            default_filter: default_filter(),
        }
    }
}

impl Config {
    /// Load configuration from an explicit path, or from the per-user config
    /// directory when none is given. A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match default_config_path() {
                Some(path) => path,
                None => return Ok(Config::default()),
            },
        };
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// The configured startup sort key.
    pub fn default_sort(&self) -> SortKey {
        SortKey::parse(&self.ui.default_sort).unwrap_or_default()
    }

    /// The configured startup filter.
    pub fn default_filter(&self) -> FilterKey {
        FilterKey::parse(&self.ui.default_filter).unwrap_or_default()
    }

    fn validate(&self) -> Result<()> {
        if SortKey::parse(&self.ui.default_sort).is_none() {
            return Err(Error::InvalidConfig(format!(
                "unknown sort key: {}",
                self.ui.default_sort
            )));
        }
        if FilterKey::parse(&self.ui.default_filter).is_none() {
            return Err(Error::InvalidConfig(format!(
                "unknown filter: {}",
                self.ui.default_filter
            )));
        }
        Ok(())
    }
}

fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "taskdeck").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = Config::load(Some(&temp.path().join(CONFIG_FILE))).unwrap();
        assert_eq!(config.default_sort(), SortKey::DeadlineAsc);
        assert_eq!(config.default_filter(), FilterKey::All);
        assert!(config.data_file.is_none());
    }

    #[test]
    fn partial_config_fills_in_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE);
        std::fs::write(&path, "[ui]\ndefault_sort = \"title-asc\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.default_sort(), SortKey::TitleAsc);
        assert_eq!(config.default_filter(), FilterKey::All);
    }

    #[test]
    fn data_file_override_is_read() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE);
        std::fs::write(&path, "data_file = \"/tmp/elsewhere.json\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(
            config.data_file.as_deref(),
            Some(Path::new("/tmp/elsewhere.json"))
        );
    }

    #[test]
    fn unknown_sort_key_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE);
        std::fs::write(&path, "[ui]\ndefault_sort = \"due\"\n").unwrap();

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE);
        std::fs::write(&path, "[ui\n").unwrap();

        assert!(Config::load(Some(&path)).is_err());
    }
}

//! Configuration file support.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::Category;

/// Environment variable pointing at an alternative config file.
pub const CONFIG_ENV: &str = "MARGINALIA_CONFIG";

/// Application configuration loaded from config file.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Data directory holding the notes and categories documents
    pub dir: Option<PathBuf>,

    /// Default (protected) categories, replacing the built-in list
    pub categories: Option<Vec<String>>,
}

impl Config {
    /// Load configuration from the default config file location.
    ///
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(Self::config_path())
    }

    /// Load configuration from an explicit path.
    pub fn load_from(config_path: PathBuf) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read config file: {}", config_path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", config_path.display()))
    }

    /// Returns the path to the config file.
    ///
    /// `$MARGINALIA_CONFIG` if set, otherwise `~/.config/marginalia/config.toml`.
    pub fn config_path() -> PathBuf {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("marginalia")
            .join("config.toml")
    }

    /// Resolve the data directory, with CLI argument taking precedence.
    ///
    /// Precedence order:
    /// 1. CLI `--dir` argument
    /// 2. Config file `dir` setting
    /// 3. Platform data directory (`~/.local/share/marginalia` on Linux)
    pub fn data_dir(&self, cli_dir: Option<&PathBuf>) -> PathBuf {
        cli_dir
            .cloned()
            .or_else(|| self.dir.clone())
            .unwrap_or_else(|| {
                dirs::data_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("marginalia")
            })
    }

    /// Parse the configured default categories.
    ///
    /// An absent or empty list means the built-in defaults.
    pub fn default_categories(&self) -> Result<Vec<Category>> {
        let Some(names) = &self.categories else {
            return Ok(Vec::new());
        };
        names
            .iter()
            .map(|name| {
                Category::new(name)
                    .with_context(|| format!("invalid category '{}' in config file", name))
            })
            .collect()
    }
}

//! Loader configuration.
//!
//! Values are layered: built-in defaults, then `<base_dir>/config.json`, then
//! the `CURRENT_PROJECT_DIR` environment variable. Command-line flags are applied
//! on top by the caller.

use crate::error::{LookError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const DEFAULT_HOME_DIR: &str = ".lookloader";
pub const CONFIG_FILE_NAME: &str = "config.json";
/// Project root exported by the studio launcher
pub const PROJECT_DIR_ENV: &str = "CURRENT_PROJECT_DIR";
pub const HOME_ENV: &str = "LOOKLOADER_HOME";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LoaderConfig {
    /// Directory holding `assets/<name>/...`
    pub project_root: Option<PathBuf>,
    /// Default of the replace toggle when attaching looks
    pub replace_looks: bool,
    /// Object name prefixes ignored when enumerating every standin
    pub skip_prefixes: Vec<String>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            project_root: None,
            replace_looks: false,
            skip_prefixes: vec!["frame".to_string()],
        }
    }
}

impl LoaderConfig {
    /// `LOOKLOADER_HOME`, or `~/.lookloader`.
    pub fn base_dir() -> PathBuf {
        if let Ok(env_dir) = std::env::var(HOME_ENV) {
            return PathBuf::from(env_dir);
        }

        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_HOME_DIR)
    }

    pub fn default_path() -> PathBuf {
        Self::base_dir().join(CONFIG_FILE_NAME)
    }

    /// Defaults, overlaid with the config file and the environment.
    pub fn load() -> Result<Self> {
        let config = Self::load_from(&Self::default_path())?;
        Ok(config.with_project_dir(std::env::var(PROJECT_DIR_ENV).ok()))
    }

    /// Read a config file; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Override the project root when `dir` is set and non-empty.
    pub fn with_project_dir(mut self, dir: Option<String>) -> Self {
        if let Some(dir) = dir.filter(|d| !d.trim().is_empty()) {
            self.project_root = Some(PathBuf::from(dir));
        }
        self
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::default_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn require_project_root(&self) -> Result<&Path> {
        self.project_root.as_deref().ok_or_else(|| {
            LookError::Config(format!(
                "current project directory not found, set {} or pass --root",
                PROJECT_DIR_ENV
            ))
        })
    }
}

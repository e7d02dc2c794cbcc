use anyhow::{Context, Result};
use directories::{BaseDirs, ProjectDirs};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::{PrayerIndex, PRAYERS_PER_CYCLE};

fn default_prayers_per_day() -> usize {
    2
}
fn default_prayer_names() -> Vec<String> {
    ["subh", "dhuhr", "`asr", "maghrib", "ishaa"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
fn default_storage_location() -> PathBuf {
    PathBuf::from("~/.qada.sqlite")
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("prayer_names must list exactly {expected} names, found {found}")]
    WrongNameCount { expected: usize, found: usize },
    #[error("prayer_names entry {0} is empty")]
    EmptyName(usize),
    #[error("could not determine the home directory")]
    NoHome,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default batch size for `add`.
    #[serde(default = "default_prayers_per_day")]
    pub prayers_per_day: usize,
    #[serde(default = "default_prayer_names")]
    pub prayer_names: Vec<String>,
    /// A leading `~/` is resolved against the home directory.
    #[serde(default = "default_storage_location")]
    pub storage_location: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            prayers_per_day: default_prayers_per_day(),
            prayer_names: default_prayer_names(),
            storage_location: default_storage_location(),
        }
    }
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "qada").context("Could not determine project directories")
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Read the config at `path`, writing one with defaults first if it is absent.
    pub fn load_or_init(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save(path)?;
            info!("wrote default config to {:?}", path);
            return Ok(config);
        }
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Reading {:?}", path))?;
        let config: AppConfig =
            toml::from_str(&content).with_context(|| format!("Parsing {:?}", path))?;
        config
            .validate()
            .with_context(|| format!("Invalid config {:?}", path))?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Creating directory {:?}", parent))?;
        }
        let content = toml::to_string_pretty(self).context("Serializing config")?;
        std::fs::write(path, content).with_context(|| format!("Writing {:?}", path))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let expected = usize::from(PRAYERS_PER_CYCLE);
        if self.prayer_names.len() != expected {
            return Err(ConfigError::WrongNameCount {
                expected,
                found: self.prayer_names.len(),
            });
        }
        if let Some(i) = self.prayer_names.iter().position(|n| n.trim().is_empty()) {
            return Err(ConfigError::EmptyName(i + 1));
        }
        Ok(())
    }

    pub fn prayer_name(&self, prayer: PrayerIndex) -> &str {
        self.prayer_names
            .get(prayer.slot())
            .map(String::as_str)
            .unwrap_or("?")
    }

    pub fn storage_path(&self) -> Result<PathBuf, ConfigError> {
        match self.storage_location.strip_prefix("~") {
            Ok(rest) => {
                let base = BaseDirs::new().ok_or(ConfigError::NoHome)?;
                Ok(base.home_dir().join(rest))
            }
            Err(_) => Ok(self.storage_location.clone()),
        }
    }
}

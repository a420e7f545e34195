//! Configuration file support for Calis.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/calis/config.toml`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub workout: WorkoutConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Workout defaults applied when a database is first seeded
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkoutConfig {
    #[serde(default = "default_rest_timer_seconds")]
    pub rest_timer_seconds: u32,
}

impl Default for WorkoutConfig {
    fn default() -> Self {
        Self {
            rest_timer_seconds: default_rest_timer_seconds(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("calis")
}

fn default_rest_timer_seconds() -> u32 {
    90
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::debug!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("calis")
            .join("config.toml")
    }

    /// Path of the database snapshot inside the data directory
    pub fn database_path(&self) -> PathBuf {
        self.data.data_dir.join("calis.json")
    }

    pub fn validate(&self) -> Result<()> {
        if self.workout.rest_timer_seconds == 0 {
            return Err(Error::Config(
                "workout.rest_timer_seconds must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}

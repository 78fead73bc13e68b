//! Global configuration for ausflug (stored in ~/.config/ausflug/config.toml)

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{AusflugError, Result};

const CONFIG_DIR: &str = "ausflug";
const CONFIG_FILE: &str = "config.toml";
const CONFIG_DIR_ENV_VAR: &str = "AUSFLUG_CONFIG_DIR";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Default dataset path, used when `--data` is not given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset: Option<PathBuf>,

    /// Favorites file override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorites: Option<PathBuf>,

    /// Geocoder endpoint override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geocoder_url: Option<String>,
}

impl GlobalConfig {
    fn config_path() -> Result<PathBuf> {
        // Allow environment variable override for testing
        let config_dir = if let Ok(env_dir) = std::env::var(CONFIG_DIR_ENV_VAR) {
            PathBuf::from(env_dir)
        } else {
            dirs::config_dir()
                .ok_or_else(|| {
                    AusflugError::Other("unable to determine config directory".to_string())
                })?
                .join(CONFIG_DIR)
        };

        Ok(config_dir.join(CONFIG_FILE))
    }

    /// Load the global config; absent file means defaults.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;

        toml::from_str(&content).map_err(|e| AusflugError::InvalidConfig {
            path,
            reason: e.to_string(),
        })
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        let config_dir = path
            .parent()
            .ok_or_else(|| AusflugError::Other("invalid config path".to_string()))?;

        fs::create_dir_all(config_dir)?;

        let content = toml::to_string_pretty(self)
            .map_err(|e| AusflugError::Other(format!("failed to serialize config: {}", e)))?;

        fs::write(&path, content)?;

        Ok(())
    }
}

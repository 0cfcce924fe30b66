//! Configuration for Restaker
//!
//! Networks are listed in run order. Global retry settings apply unless a
//! network overrides them.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Retry ceiling per network unless overridden (attempts = retries + 1)
    pub retries: u32,
    /// Delay between attempts, in seconds
    pub delay_secs: u64,
    /// Networks in run order
    pub networks: Vec<NetworkConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            retries: 2,
            delay_secs: 30,
            networks: Vec::new(),
        }
    }
}

/// One target network, immutable once loaded for a run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Unique network name, used for filtering
    pub name: String,
    /// Human-readable name for logs and reports
    pub pretty_name: Option<String>,
    pub enabled: bool,
    pub autostake: AutostakeConfig,
    pub health_check: HealthCheckConfig,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            pretty_name: None,
            enabled: true,
            autostake: AutostakeConfig::default(),
            health_check: HealthCheckConfig::default(),
        }
    }
}

impl NetworkConfig {
    pub fn display_name(&self) -> &str {
        self.pretty_name.as_deref().unwrap_or(&self.name)
    }

    /// Retry ceiling for this network, falling back to the global default
    pub fn retries(&self, default: u32) -> u32 {
        self.autostake.retries.unwrap_or(default)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AutostakeConfig {
    /// Per-network retry ceiling override
    pub retries: Option<u32>,
    /// Coin type for key derivation, where the chain registry disagrees
    pub slip44: Option<u32>,
    pub correct_slip44: bool,
}

/// Health sink endpoint, healthchecks.io style
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthCheckConfig {
    /// Base ping address; the default public instance when absent
    pub address: Option<String>,
    /// Check identifier; reports are dropped when absent
    pub uuid: Option<String>,
    pub enabled: bool,
}

impl Default for HealthCheckConfig {
    fn default() -> Self {
        Self {
            address: None,
            uuid: None,
            enabled: true,
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path);
        }

        // Try primary location: ~/.config/restaker/restaker.yml
        if let Some(config_dir) = dirs::config_dir() {
            let primary_config = config_dir.join("restaker").join("restaker.yml");
            if primary_config.exists() {
                match Self::load_from_file(&primary_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", primary_config.display(), e);
                    }
                }
            }
        }

        // Try fallback location: ./restaker.yml
        let fallback_config = PathBuf::from("restaker.yml");
        if fallback_config.exists() {
            match Self::load_from_file(&fallback_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load config from {}: {}", fallback_config.display(), e);
                }
            }
        }

        // No config file found, use defaults
        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)?;

        let config: Self = serde_yaml::from_str(&content)?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

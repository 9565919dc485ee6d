//! Effective cache settings of an inventory source.
//!
//! Each option is resolved in order: the inventory source file, then its
//! environment variable, then the built-in default.
//!
//! | option | variable | default |
//! |---|---|---|
//! | `cache` | `VAGRANT_INVENTORY_CACHE` | `false` |
//! | `cache_plugin` | `VAGRANT_INVENTORY_CACHE_PLUGIN` | `jsonfile` |
//! | `cache_timeout` | `VAGRANT_INVENTORY_CACHE_TIMEOUT` | `3600` |
//! | `cache_connection` | `VAGRANT_INVENTORY_CACHE_DIR` | `<platform cache dir>/vagrant-inventory` |
//! | `cache_prefix` | - | `ansible_inventory_` |

use anyhow::{Result, anyhow};
use serde::Deserialize;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use super::InventorySourceConfig;
use crate::cache::{ConfiguredCache, JsonFileCache, MemoryCache};
use crate::constants::{
    CACHE_DIR_NAME, DEFAULT_CACHE_PREFIX, DEFAULT_CACHE_TIMEOUT_SECS, ENV_CACHE, ENV_CACHE_DIR,
    ENV_CACHE_PLUGIN, ENV_CACHE_TIMEOUT,
};
use crate::core::InventoryError;
use crate::utils::platform::expand_path;

/// Cache backend selected by `cache_plugin`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CachePlugin {
    /// One JSON file per source, kept between runs
    #[default]
    JsonFile,
    /// Process memory only
    Memory,
}

impl FromStr for CachePlugin {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "jsonfile" => Ok(Self::JsonFile),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown cache plugin '{other}' (expected jsonfile or memory)")),
        }
    }
}

/// Fully resolved cache options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSettings {
    /// Whether the user wants caching at all.
    pub enabled: bool,
    /// Backend.
    pub plugin: CachePlugin,
    /// Entry lifetime; zero disables expiry.
    pub timeout: Duration,
    /// Directory of the JSON file backend.
    pub dir: PathBuf,
    /// File name prefix of the JSON file backend.
    pub prefix: String,
}

impl CacheSettings {
    /// Resolves settings from `config` and the process environment.
    pub fn from_env(config: &InventorySourceConfig) -> Result<Self> {
        Self::resolve(config, |name| std::env::var(name).ok())
    }

    /// Resolves settings from `config`, looking up variables through `env`.
    pub fn resolve<F>(config: &InventorySourceConfig, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let enabled = match config.cache {
            Some(enabled) => enabled,
            None => env(ENV_CACHE).map(|v| parse_bool(ENV_CACHE, &v)).transpose()?.unwrap_or(false),
        };

        let plugin = match config.cache_plugin {
            Some(plugin) => plugin,
            None => env(ENV_CACHE_PLUGIN)
                .map(|v| v.parse().map_err(|reason| env_error(ENV_CACHE_PLUGIN, reason)))
                .transpose()?
                .unwrap_or_default(),
        };

        let timeout_secs = match config.cache_timeout {
            Some(secs) => secs,
            None => env(ENV_CACHE_TIMEOUT)
                .map(|v| {
                    v.trim().parse::<u64>().map_err(|e| {
                        env_error(ENV_CACHE_TIMEOUT, format!("invalid number of seconds '{v}': {e}"))
                    })
                })
                .transpose()?
                .unwrap_or(DEFAULT_CACHE_TIMEOUT_SECS),
        };

        let dir = match config.cache_connection.clone().or_else(|| env(ENV_CACHE_DIR)) {
            Some(dir) => expand_path(&dir)?,
            None => default_cache_dir()?,
        };

        let prefix = config.cache_prefix.clone().unwrap_or_else(|| DEFAULT_CACHE_PREFIX.to_string());

        Ok(Self {
            enabled,
            plugin,
            timeout: Duration::from_secs(timeout_secs),
            dir,
            prefix,
        })
    }

    /// Creates the configured cache backend.
    pub fn build(&self) -> ConfiguredCache {
        match self.plugin {
            CachePlugin::Memory => ConfiguredCache::Memory(MemoryCache::new()),
            CachePlugin::JsonFile => ConfiguredCache::JsonFile(
                JsonFileCache::new(&self.dir)
                    .with_timeout(self.timeout)
                    .with_prefix(&self.prefix),
            ),
        }
    }
}

/// Platform cache directory joined with `vagrant-inventory`.
pub fn default_cache_dir() -> Result<PathBuf> {
    dirs::cache_dir()
        .map(|dir| dir.join(CACHE_DIR_NAME))
        .ok_or_else(|| anyhow!("Unable to determine cache directory; set {ENV_CACHE_DIR}"))
}

fn parse_bool(name: &str, value: &str) -> Result<bool, InventoryError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(env_error(name, format!("expected a boolean, got '{value}'"))),
    }
}

fn env_error(name: &str, reason: String) -> InventoryError {
    InventoryError::ConfigError {
        file: format!("${name}"),
        reason,
    }
}

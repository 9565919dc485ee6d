//! Inventory source configuration.
//!
//! An inventory source is a small YAML file, `vagrant.yml` by default:
//!
//! ```yaml
//! plugin: vagrant
//! vagrantfile: ../machines        # Vagrantfile or the directory holding it
//! cache: true
//! cache_plugin: jsonfile          # jsonfile | memory
//! cache_timeout: 3600             # seconds, 0 = never expire
//! cache_connection: ~/.cache/vagrant-inventory
//! cache_prefix: ansible_inventory_
//! ```
//!
//! Only `plugin` and `vagrantfile` are required. Cache options missing from
//! the file are taken from the environment (see [`CacheSettings`]), then from
//! built-in defaults.
//!
//! Keys this plugin does not use (`strict`, `compose`, `keyed_groups` and other
//! options shared by Ansible inventory sources) are collected in
//! [`InventorySourceConfig::ignored`] instead of failing the load.

pub mod cache_settings;

pub use cache_settings::{CachePlugin, CacheSettings, default_cache_dir};

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::constants::PLUGIN_NAME;
use crate::core::InventoryError;

/// Parsed inventory source file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InventorySourceConfig {
    /// Plugin name; always `vagrant` after [`load`].
    pub plugin: String,
    /// Path of the Vagrantfile or its directory, relative to the source file.
    pub vagrantfile: String,
    /// Whether to cache the inventory.
    #[serde(default)]
    pub cache: Option<bool>,
    /// Cache backend.
    #[serde(default)]
    pub cache_plugin: Option<CachePlugin>,
    /// Entry lifetime in seconds.
    #[serde(default)]
    pub cache_timeout: Option<u64>,
    /// Cache directory.
    #[serde(default)]
    pub cache_connection: Option<String>,
    /// Cache file name prefix.
    #[serde(default)]
    pub cache_prefix: Option<String>,
    /// Keys not used by this plugin.
    #[serde(flatten)]
    pub ignored: BTreeMap<String, serde_yaml::Value>,
}

#[derive(Deserialize)]
struct PluginHeader {
    plugin: Option<String>,
}

/// Returns `true` when `path` is an existing, readable file.
pub fn verify_file(path: &Path) -> bool {
    path.is_file() && fs::File::open(path).is_ok()
}

/// Loads and validates the inventory source at `path`.
///
/// # Errors
///
/// - [`InventoryError::ConfigNotFound`] when the file is missing or unreadable
/// - [`InventoryError::UnsupportedPlugin`] when `plugin` names another plugin
/// - [`InventoryError::ConfigError`] for malformed YAML or missing keys
pub fn load(path: &Path) -> Result<InventorySourceConfig> {
    if !verify_file(path) {
        return Err(InventoryError::ConfigNotFound {
            path: path.display().to_string(),
        }
        .into());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read inventory source: {}", path.display()))?;
    let config = parse(&content, path)?;
    if !config.ignored.is_empty() {
        let keys: Vec<&str> = config.ignored.keys().map(String::as_str).collect();
        tracing::debug!("Ignoring unused keys in {}: {}", path.display(), keys.join(", "));
    }

    tracing::debug!("Loaded inventory source {} (vagrantfile: {})", path.display(), config.vagrantfile);
    Ok(config)
}

fn parse(content: &str, path: &Path) -> Result<InventorySourceConfig, InventoryError> {
    let config_error = |reason: String| InventoryError::ConfigError {
        file: path.display().to_string(),
        reason,
    };

    // Plugin identity is checked before the full schema
    let header: PluginHeader =
        serde_yaml::from_str(content).map_err(|e| config_error(e.to_string()))?;
    match header.plugin.as_deref() {
        Some(PLUGIN_NAME) => {}
        Some(other) => {
            return Err(InventoryError::UnsupportedPlugin {
                file: path.display().to_string(),
                plugin: other.to_string(),
            });
        }
        None => return Err(config_error("missing field `plugin`".to_string())),
    }

    serde_yaml::from_str(content).map_err(|e| config_error(e.to_string()))
}

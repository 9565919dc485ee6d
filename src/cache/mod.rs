//! Storage for previously parsed inventories.
//!
//! Running `vagrant ssh-config` boots Ruby and queries every provider, which
//! takes seconds. The resolver therefore keeps parsed host lists in an
//! [`InventoryCache`] keyed by the inventory source path.
//!
//! Two backends are provided:
//! - [`MemoryCache`] - process-local map, useful when the resolver is embedded
//!   in a longer-lived process and in tests
//! - [`JsonFileCache`] - one JSON file per key with expiry, shared between runs
//!
//! A lookup that finds nothing (never written, expired, or unreadable) is a
//! miss, reported as `Ok(None)`. Errors are reserved for genuine I/O failures.

pub mod jsonfile;
pub mod lock;

pub use jsonfile::JsonFileCache;
pub use lock::CacheLock;

use anyhow::Result;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::Path;

use crate::constants::PLUGIN_NAME;
use crate::ssh_config::HostRecord;

/// Cache collaborator used by the resolver.
#[allow(async_fn_in_trait)]
pub trait InventoryCache {
    /// Returns the hosts stored under `key`, or `None` on a miss.
    async fn get(&self, key: &str) -> Result<Option<Vec<HostRecord>>>;

    /// Stores `hosts` under `key`, replacing any previous entry.
    async fn set(&mut self, key: &str, hosts: &[HostRecord]) -> Result<()>;

    /// Derives the key under which the inventory of `source_path` is stored.
    fn cache_key(&self, source_path: &Path) -> String {
        cache_key(source_path)
    }
}

/// Deterministic cache key for an inventory source path.
///
/// The key combines the plugin name with short digests of the plugin name and
/// the path, e.g. `vagrant_1a2b3s_4c5d6`, so sources from different plugins
/// sharing one cache directory never collide.
///
/// # Examples
///
/// ```rust
/// use vagrant_inventory::cache::cache_key;
/// use std::path::Path;
///
/// let key = cache_key(Path::new("/srv/inventory/vagrant.yml"));
/// assert!(key.starts_with("vagrant_"));
/// assert_eq!(key, cache_key(Path::new("/srv/inventory/vagrant.yml")));
/// ```
#[must_use]
pub fn cache_key(source_path: &Path) -> String {
    let plugin_digest = short_digest(PLUGIN_NAME.as_bytes());
    let path_digest = short_digest(source_path.to_string_lossy().as_bytes());
    format!("{PLUGIN_NAME}_{plugin_digest}s_{path_digest}")
}

fn short_digest(data: &[u8]) -> String {
    let digest = hex::encode(Sha256::digest(data));
    digest[..5].to_string()
}

/// Process-local cache backed by a `HashMap`.
#[derive(Debug, Default, Clone)]
pub struct MemoryCache {
    entries: HashMap<String, Vec<HostRecord>>,
}

impl MemoryCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when an entry exists for `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl InventoryCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<HostRecord>>> {
        Ok(self.entries.get(key).cloned())
    }

    async fn set(&mut self, key: &str, hosts: &[HostRecord]) -> Result<()> {
        self.entries.insert(key.to_string(), hosts.to_vec());
        Ok(())
    }
}

/// Any backend selected at runtime from the inventory source configuration.
#[derive(Debug)]
pub enum ConfiguredCache {
    /// In-memory cache
    Memory(MemoryCache),
    /// JSON file cache
    JsonFile(JsonFileCache),
}

impl InventoryCache for ConfiguredCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<HostRecord>>> {
        match self {
            Self::Memory(cache) => cache.get(key).await,
            Self::JsonFile(cache) => cache.get(key).await,
        }
    }

    async fn set(&mut self, key: &str, hosts: &[HostRecord]) -> Result<()> {
        match self {
            Self::Memory(cache) => cache.set(key, hosts).await,
            Self::JsonFile(cache) => cache.set(key, hosts).await,
        }
    }
}

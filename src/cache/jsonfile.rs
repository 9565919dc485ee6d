//! JSON file cache backend.
//!
//! Each key is stored as `<dir>/<prefix><key>`:
//!
//! ```json
//! {
//!   "created_at": "2026-10-16T09:30:00Z",
//!   "hosts": [{ "host": "default", "hostname": "127.0.0.1", "port": 2222 }]
//! }
//! ```
//!
//! Entries older than the configured timeout are treated as missing. A
//! timeout of zero disables expiry.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::InventoryCache;
use super::lock::CacheLock;
use crate::constants::DEFAULT_CACHE_PREFIX;
use crate::ssh_config::HostRecord;
use crate::utils::fs::{atomic_write, ensure_dir};

#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    created_at: DateTime<Utc>,
    hosts: Vec<HostRecord>,
}

/// Cache storing one JSON document per key in a directory.
#[derive(Debug, Clone)]
pub struct JsonFileCache {
    dir: PathBuf,
    timeout: Duration,
    prefix: String,
}

impl JsonFileCache {
    /// Creates a cache rooted at `dir` with the default prefix and no expiry.
    ///
    /// The directory is created lazily on the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            timeout: Duration::ZERO,
            prefix: DEFAULT_CACHE_PREFIX.to_string(),
        }
    }

    /// Sets the entry lifetime. `Duration::ZERO` means entries never expire.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the file name prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Directory holding the entry files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    pub fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}{}", self.prefix, key))
    }

    fn is_expired(&self, entry: &CacheEntry) -> bool {
        if self.timeout.is_zero() {
            return false;
        }
        let age = Utc::now().signed_duration_since(entry.created_at);
        // Future timestamps (clock skew) count as fresh
        age.to_std().is_ok_and(|age| age >= self.timeout)
    }

    async fn discard(&self, path: &Path, reason: &str) {
        tracing::warn!(target: "cache", "Discarding cache entry {}: {}", path.display(), reason);
        if let Err(e) = tokio::fs::remove_file(path).await {
            tracing::debug!(target: "cache", "Could not remove {}: {}", path.display(), e);
        }
    }
}

impl InventoryCache for JsonFileCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<HostRecord>>> {
        let path = self.entry_path(key);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(target: "cache", "Cache miss for {}", key);
                return Ok(None);
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read cache entry: {}", path.display()));
            }
        };

        let entry: CacheEntry = match serde_json::from_str(&content) {
            Ok(entry) => entry,
            Err(e) => {
                self.discard(&path, &e.to_string()).await;
                return Ok(None);
            }
        };

        if self.is_expired(&entry) {
            tracing::debug!(
                target: "cache",
                "Cache entry for {} expired (created {})",
                key,
                entry.created_at.to_rfc3339()
            );
            return Ok(None);
        }

        tracing::debug!(target: "cache", "Cache hit for {} ({} host(s))", key, entry.hosts.len());
        Ok(Some(entry.hosts))
    }

    async fn set(&mut self, key: &str, hosts: &[HostRecord]) -> Result<()> {
        ensure_dir(&self.dir)?;
        let _lock = CacheLock::acquire(&self.dir, key).await?;

        let entry = CacheEntry {
            created_at: Utc::now(),
            hosts: hosts.to_vec(),
        };
        let content =
            serde_json::to_vec_pretty(&entry).context("Failed to serialize cache entry")?;

        let path = self.entry_path(key);
        atomic_write(&path, &content)?;
        tracing::debug!(target: "cache", "Wrote {} host(s) to {}", hosts.len(), path.display());
        Ok(())
    }
}

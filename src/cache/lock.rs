//! File-based locking for cache entries.
//!
//! Two inventory runs can refresh the same source at once (for example two
//! `ansible-playbook` invocations started together). Writers take an exclusive
//! lock on `<cache_dir>/.locks/<key>.lock` so entry files are replaced one
//! writer at a time. The lock is released when the [`CacheLock`] is dropped.

use anyhow::{Context, Result};
use fs4::fs_std::FileExt;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use crate::utils::fs::ensure_dir;

/// Exclusive lock on one cache key, held until drop.
#[derive(Debug)]
pub struct CacheLock {
    _file: File,
    path: PathBuf,
}

impl CacheLock {
    /// Waits until the exclusive lock for `key` is acquired.
    ///
    /// The blocking `flock` call runs on the blocking thread pool so the async
    /// runtime keeps serving other tasks while a second writer waits.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use vagrant_inventory::cache::CacheLock;
    /// use std::path::Path;
    ///
    /// # async fn example() -> anyhow::Result<()> {
    /// let lock = CacheLock::acquire(Path::new("/tmp/vagrant-inventory"), "vagrant_abcdes_01234").await?;
    /// // ... write the entry ...
    /// drop(lock);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn acquire(cache_dir: &Path, key: &str) -> Result<Self> {
        let locks_dir = cache_dir.join(".locks");
        ensure_dir(&locks_dir)?;

        let lock_path = locks_dir.join(format!("{key}.lock"));
        let lock_path_clone = lock_path.clone();
        let key = key.to_string();

        let file = tokio::task::spawn_blocking(move || -> Result<File> {
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&lock_path_clone)
                .with_context(|| {
                    format!("Failed to open lock file: {}", lock_path_clone.display())
                })?;

            file.lock_exclusive().with_context(|| format!("Failed to acquire lock for: {key}"))?;
            Ok(file)
        })
        .await
        .context("Failed to spawn blocking task for lock acquisition")??;

        tracing::trace!(target: "cache", "Acquired lock {}", lock_path.display());

        Ok(Self {
            _file: file,
            path: lock_path,
        })
    }
}

impl Drop for CacheLock {
    fn drop(&mut self) {
        #[allow(unstable_name_collisions)]
        if let Err(e) = self._file.unlock() {
            tracing::warn!(target: "cache", "Failed to unlock {}: {}", self.path.display(), e);
        }
    }
}

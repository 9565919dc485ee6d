//! File system helpers: logical path normalization, directory creation and
//! atomic writes for cache entries.

use anyhow::{Context, Result};
use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

/// Normalizes a path by resolving `.` and `..` components.
///
/// This performs logical resolution only: it neither touches the filesystem nor
/// follows symbolic links. It is the fallback used when a path cannot be
/// canonicalized because it does not exist.
///
/// # Examples
///
/// ```rust
/// use vagrant_inventory::utils::fs::normalize_path;
/// use std::path::{Path, PathBuf};
///
/// let normalized = normalize_path(Path::new("/srv/./inventory/../vms"));
/// assert_eq!(normalized, PathBuf::from("/srv/vms"));
/// ```
#[must_use]
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                components.pop();
            }
            c => components.push(c),
        }
    }

    components.iter().collect()
}

/// Canonicalizes `path`, falling back to [`normalize_path`] when it does not exist.
///
/// Symlinks and `..` segments are resolved for existing paths. Missing paths are
/// kept so that the caller can report them rather than failing here.
#[must_use]
pub fn resolve_lenient(path: &Path) -> PathBuf {
    match path.canonicalize() {
        Ok(canonical) => canonical,
        Err(e) => {
            tracing::trace!("Cannot canonicalize {}: {}", path.display(), e);
            let absolute = if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir().map(|cwd| cwd.join(path)).unwrap_or_else(|_| path.to_path_buf())
            };
            normalize_path(&absolute)
        }
    }
}

/// Ensures a directory exists, creating it and its parents if necessary.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
    } else if !path.is_dir() {
        return Err(anyhow::anyhow!("Path exists but is not a directory: {}", path.display()));
    }
    Ok(())
}

/// Atomically writes bytes to a file using a write-then-rename strategy.
///
/// Content goes to a sibling `<file name>.tmp` file which is synced to disk and
/// then renamed over the target, so readers never observe a partial write.
/// Parent directories are created as needed.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }

    let temp_path = temp_path_for(path);

    {
        let mut file = fs::File::create(&temp_path)
            .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

        file.write_all(content)
            .with_context(|| format!("Failed to write to temp file: {}", temp_path.display()))?;

        file.sync_all().with_context(|| "Failed to sync file to disk")?;
    }

    fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename temp file to: {}", path.display()))?;

    Ok(())
}

/// Temp file used by [`atomic_write`]: the full file name plus `.tmp`.
///
/// Dots inside the file name are kept, so distinct targets in one directory
/// never share a temp file.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

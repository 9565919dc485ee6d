//! Vagrant project discovery and `vagrant ssh-config` invocation.
//!
//! - [`locate_vagrantfile_dir`] turns the user's `vagrantfile` option into the
//!   directory Vagrant must run in.
//! - [`SshConfigSource`] is the seam through which the resolver obtains the raw
//!   `ssh-config` text; [`VagrantCli`] is the implementation that runs Vagrant.

pub mod command_builder;

use anyhow::Result;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::constants::VAGRANTFILE;
use crate::core::InventoryError;
use crate::utils::fs::resolve_lenient;
use command_builder::VagrantCommand;

/// Resolves the `vagrantfile` option to the directory containing the Vagrantfile.
///
/// Relative paths are taken relative to `inventory_file_dir`, the directory of
/// the inventory source file. The result is canonicalized, then:
///
/// - an existing file must be named `Vagrantfile`, and its parent is returned;
/// - anything else is treated as a directory that must contain a `Vagrantfile`,
///   and is returned itself.
///
/// # Errors
///
/// Returns [`InventoryError::VagrantfileNotFound`] carrying the resolved path
/// when neither rule holds.
///
/// # Examples
///
/// ```rust,no_run
/// use vagrant_inventory::vagrant::locate_vagrantfile_dir;
/// use std::path::Path;
///
/// # fn example() -> Result<(), vagrant_inventory::core::InventoryError> {
/// // Both forms resolve to /home/me/machines
/// let dir = locate_vagrantfile_dir("../machines", Path::new("/home/me/inventory"))?;
/// let same = locate_vagrantfile_dir("/home/me/machines/Vagrantfile", Path::new("/"))?;
/// assert_eq!(dir, same);
/// # Ok(())
/// # }
/// ```
pub fn locate_vagrantfile_dir(
    raw_path: &str,
    inventory_file_dir: &Path,
) -> Result<PathBuf, InventoryError> {
    let candidate = Path::new(raw_path);
    let candidate = if candidate.is_absolute() {
        candidate.to_path_buf()
    } else {
        inventory_file_dir.join(candidate)
    };
    let resolved = resolve_lenient(&candidate);
    tracing::debug!("Resolved vagrantfile option '{}' to {}", raw_path, resolved.display());

    if resolved.is_file() {
        if resolved.file_name() != Some(OsStr::new(VAGRANTFILE)) {
            return Err(not_found(
                &resolved,
                "vagrantfile option must point to Vagrantfile or containing folder",
            ));
        }
        return resolved
            .parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| not_found(&resolved, "Vagrantfile has no parent directory"));
    }

    if !resolved.join(VAGRANTFILE).is_file() {
        return Err(not_found(&resolved, "directory does not contain Vagrantfile"));
    }

    Ok(resolved)
}

fn not_found(path: &Path, reason: &str) -> InventoryError {
    InventoryError::VagrantfileNotFound {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Source of raw `ssh-config` text for a Vagrant project directory.
///
/// The resolver only depends on this trait, so tests can substitute a canned
/// source and count invocations.
#[allow(async_fn_in_trait)]
pub trait SshConfigSource {
    /// Returns the `ssh-config` dump for the project rooted at `vagrant_dir`.
    async fn ssh_config(&self, vagrant_dir: &Path) -> Result<String>;
}

/// Runs the real `vagrant ssh-config`.
#[derive(Debug, Clone, Copy, Default)]
pub struct VagrantCli;

impl SshConfigSource for VagrantCli {
    async fn ssh_config(&self, vagrant_dir: &Path) -> Result<String> {
        let output = VagrantCommand::ssh_config()
            .current_dir(vagrant_dir)
            .with_context(vagrant_dir.display().to_string())
            .execute()
            .await?;
        if !output.stderr.is_empty() {
            tracing::warn!(target: "vagrant", "vagrant ssh-config: {}", output.stderr);
        }
        Ok(output.stdout)
    }
}

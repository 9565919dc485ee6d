//! Platform-specific helpers: executable names, PATH lookups and user path expansion.

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Returns `true` when compiled for Windows.
#[must_use]
pub const fn is_windows() -> bool {
    cfg!(windows)
}

/// Returns the platform-specific name of the Vagrant executable.
#[must_use]
pub const fn get_vagrant_command() -> &'static str {
    if is_windows() {
        "vagrant.exe"
    } else {
        "vagrant"
    }
}

/// Checks if a command is available in the system PATH.
#[must_use]
pub fn command_exists(cmd: &str) -> bool {
    which::which(cmd).is_ok()
}

/// Expands a leading `~` and `$VAR` references in a user-supplied path.
///
/// # Examples
///
/// ```rust,no_run
/// use vagrant_inventory::utils::platform::expand_path;
///
/// # fn example() -> anyhow::Result<()> {
/// let cache_dir = expand_path("~/.cache/vagrant-inventory")?;
/// println!("{}", cache_dir.display());
/// # Ok(())
/// # }
/// ```
pub fn expand_path(path: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(path).with_context(|| {
        format!(
            "Failed to expand path: {path}\n\n\
            Common issues:\n\
            - Undefined environment variable (e.g., $UNDEFINED_VAR)\n\
            - Invalid variable syntax (use $VAR or ${{VAR}})"
        )
    })?;

    Ok(PathBuf::from(expanded.into_owned()))
}

//! Filesystem fixtures.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::constants::{DEFAULT_INVENTORY_FILE, VAGRANTFILE};

const VAGRANTFILE_CONTENT: &str = r#"Vagrant.configure("2") do |config|
  config.vm.box = "generic/debian12"
end
"#;

/// A temporary Vagrant project: a directory holding a `Vagrantfile`.
///
/// The directory is removed when the fixture is dropped.
pub struct VagrantProject {
    temp_dir: TempDir,
}

impl VagrantProject {
    /// Creates the project directory and its `Vagrantfile`.
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new().context("Failed to create temp dir")?;
        fs::write(temp_dir.path().join(VAGRANTFILE), VAGRANTFILE_CONTENT)
            .context("Failed to write Vagrantfile")?;
        Ok(Self {
            temp_dir,
        })
    }

    /// Root of the project.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Canonical root, as returned by the Vagrantfile locator.
    pub fn canonical_path(&self) -> Result<PathBuf> {
        self.path().canonicalize().context("Failed to canonicalize project dir")
    }

    /// Writes an inventory source named `vagrant.yml` with `plugin: vagrant` and
    /// the given extra YAML lines, returning its path.
    pub fn write_inventory(&self, body: &str) -> Result<PathBuf> {
        self.write_file(DEFAULT_INVENTORY_FILE, &format!("plugin: vagrant\n{body}"))
    }

    /// Writes `content` to `relative` inside the project, creating parent dirs.
    pub fn write_file(&self, relative: &str, content: &str) -> Result<PathBuf> {
        let path = self.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }
}

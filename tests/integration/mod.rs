//! Integration test suite for vagrant-inventory
//!
//! These tests run the compiled binary the way Ansible does. On unix a fake
//! `vagrant` shell script is placed first on `PATH`; it prints canned
//! `ssh-config` output and logs every invocation so tests can tell a cache hit
//! from a fresh run.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **cli**: `--list` / `--host` output
//! - **cache**: cache reuse, refresh and expiry across runs
//! - **errors**: failure reporting and exit status

#[cfg(unix)]
mod cache;
#[cfg(unix)]
mod cli;
mod errors;

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use vagrant_inventory::test_utils::{SAMPLE_SSH_CONFIG, VagrantProject, init_test_logging};

/// A Vagrant project, a fake `vagrant` executable and an isolated cache dir.
pub struct InventoryFixture {
    pub project: VagrantProject,
    bin_dir: TempDir,
    cache_dir: TempDir,
}

impl InventoryFixture {
    /// Fixture whose fake `vagrant ssh-config` prints `ssh_config`.
    pub fn new(ssh_config: &str) -> Self {
        init_test_logging(None);
        let fixture = Self {
            project: VagrantProject::new().unwrap(),
            bin_dir: TempDir::new().unwrap(),
            cache_dir: TempDir::new().unwrap(),
        };
        fixture.set_ssh_config(ssh_config);
        #[cfg(unix)]
        fixture.install_fake_vagrant();
        fixture
    }

    /// Fixture printing the two-machine sample.
    pub fn sample() -> Self {
        Self::new(SAMPLE_SSH_CONFIG)
    }

    /// Replaces the output of the fake `vagrant ssh-config`.
    pub fn set_ssh_config(&self, text: &str) {
        fs::write(self.bin_dir.path().join("ssh-config.txt"), text).unwrap();
    }

    /// Makes the fake `vagrant` exit with status 1 from now on.
    pub fn break_vagrant(&self) {
        fs::write(self.bin_dir.path().join("fail"), "").unwrap();
    }

    /// Makes the fake `vagrant` print `text` on stderr while still succeeding.
    pub fn warn_on_stderr(&self, text: &str) {
        fs::write(self.bin_dir.path().join("warning"), text).unwrap();
    }

    /// Lines logged by the fake `vagrant`: `<cwd> <args>`.
    pub fn vagrant_calls(&self) -> Vec<String> {
        fs::read_to_string(self.bin_dir.path().join("calls.log"))
            .map(|log| log.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Writes `vagrant.yml` in the project with the given extra lines.
    pub fn write_inventory(&self, body: &str) -> PathBuf {
        self.project.write_inventory(body).unwrap()
    }

    /// Cache directory handed to the binary.
    pub fn cache_dir(&self) -> &Path {
        self.cache_dir.path()
    }

    /// The binary, run from the project root with the fake `vagrant` first on PATH.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("vagrant-inventory").unwrap();
        let path = std::env::var_os("PATH").unwrap_or_default();
        let mut paths = vec![self.bin_dir.path().to_path_buf()];
        paths.extend(std::env::split_paths(&path));

        cmd.current_dir(self.project.path())
            .env("PATH", std::env::join_paths(paths).unwrap())
            .env("VAGRANT_INVENTORY_CACHE_DIR", self.cache_dir())
            .env_remove("VAGRANT_INVENTORY_CONFIG")
            .env_remove("VAGRANT_INVENTORY_CACHE")
            .env_remove("VAGRANT_INVENTORY_CACHE_PLUGIN")
            .env_remove("VAGRANT_INVENTORY_CACHE_TIMEOUT")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Runs the binary with `args`, expects success and parses stdout as JSON.
    pub fn json(&self, args: &[&str]) -> serde_json::Value {
        let output = self.cmd().args(args).assert().success().get_output().stdout.clone();
        serde_json::from_slice(&output).unwrap()
    }

    #[cfg(unix)]
    fn install_fake_vagrant(&self) {
        use std::os::unix::fs::PermissionsExt;

        let dir = self.bin_dir.path().display().to_string();
        let script = format!(
            "#!/bin/sh\n\
             echo \"$(pwd -P) $*\" >> '{dir}/calls.log'\n\
             if [ -f '{dir}/fail' ]; then\n\
             \techo \"The provider 'virtualbox' could not be found.\" >&2\n\
             \texit 1\n\
             fi\n\
             if [ -f '{dir}/warning' ]; then\n\
             \tcat '{dir}/warning' >&2\n\
             fi\n\
             cat '{dir}/ssh-config.txt'\n"
        );

        let path = self.bin_dir.path().join("vagrant");
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    }
}

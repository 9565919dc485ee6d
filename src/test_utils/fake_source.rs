//! Canned `ssh-config` source.

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::core::InventoryError;
use crate::vagrant::SshConfigSource;

/// [`SshConfigSource`] returning fixed text without running Vagrant.
///
/// Every call is counted and its working directory remembered, so tests can
/// assert whether (and where) the external process would have run.
#[derive(Debug)]
pub struct StaticSshConfig {
    output: Option<String>,
    calls: AtomicUsize,
    last_dir: Mutex<Option<PathBuf>>,
}

impl StaticSshConfig {
    /// Source that always returns `output`.
    pub fn new(output: impl Into<String>) -> Self {
        Self {
            output: Some(output.into()),
            calls: AtomicUsize::new(0),
            last_dir: Mutex::new(None),
        }
    }

    /// Source that always fails like a non-zero `vagrant` exit.
    pub fn failing() -> Self {
        Self {
            output: None,
            calls: AtomicUsize::new(0),
            last_dir: Mutex::new(None),
        }
    }

    /// Number of invocations so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Working directory of the most recent invocation.
    pub fn last_dir(&self) -> Option<PathBuf> {
        self.last_dir.lock().ok().and_then(|dir| dir.clone())
    }
}

impl SshConfigSource for StaticSshConfig {
    async fn ssh_config(&self, vagrant_dir: &Path) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_dir.lock() {
            *last = Some(vagrant_dir.to_path_buf());
        }

        match &self.output {
            Some(output) => Ok(output.clone()),
            None => Err(InventoryError::VagrantCommandError {
                command: "vagrant ssh-config".to_string(),
                reason: "exit status: 1: The provider could not be found".to_string(),
            }
            .into()),
        }
    }
}

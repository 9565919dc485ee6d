//! Test utilities for the vagrant inventory
//!
//! Available to unit tests and, through the `test-utils` feature, to the
//! integration suite:
//! - [`init_test_logging`] - tracing output inside tests
//! - [`VagrantProject`] - temporary directory with a Vagrantfile and an inventory source
//! - [`StaticSshConfig`] - canned `ssh-config` source that counts invocations
//!
//! # Example
//!
//! ```rust,no_run
//! use vagrant_inventory::test_utils::{SAMPLE_SSH_CONFIG, StaticSshConfig, VagrantProject};
//!
//! let project = VagrantProject::new().unwrap();
//! let source = project.write_inventory("vagrantfile: .\n").unwrap();
//! let ssh_config = StaticSshConfig::new(SAMPLE_SSH_CONFIG);
//! assert_eq!(ssh_config.calls(), 0);
//! ```

pub mod fake_source;
pub mod fixtures;

pub use fake_source::StaticSshConfig;
pub use fixtures::VagrantProject;

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// `vagrant ssh-config` output for a two-machine project.
pub const SAMPLE_SSH_CONFIG: &str = "\
Host box1
  HostName 127.0.0.1
  User vagrant
  Port 2222
  UserKnownHostsFile /dev/null
  StrictHostKeyChecking no
  PasswordAuthentication no
  IdentityFile /home/u/.vagrant/box1/key
  IdentitiesOnly yes
  LogLevel FATAL

Host box2
  HostName 127.0.0.1
  User vagrant
  Port 2200
  UserKnownHostsFile /dev/null
  StrictHostKeyChecking no
  PasswordAuthentication no
  IdentityFile /home/u/.vagrant/box2/key
  IdentitiesOnly yes
  LogLevel FATAL
";

/// Initialize logging for tests.
///
/// Only the first call has an effect. Uses `level` when given, otherwise
/// `RUST_LOG`; with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=cache=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}

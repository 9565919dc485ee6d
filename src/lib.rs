//! Vagrant dynamic inventory for Ansible
//!
//! Turns the machines of a Vagrant project into an Ansible inventory by running
//! `vagrant ssh-config` and translating each `Host` block into a host with its
//! connection variables.
//!
//! # Architecture Overview
//!
//! Resolution of one inventory source runs these steps in order:
//! 1. [`config`] loads the source file (`vagrant.yml`) and its cache settings
//! 2. [`vagrant::locate_vagrantfile_dir`] resolves the `vagrantfile` option
//! 3. [`vagrant::SshConfigSource`] runs `vagrant ssh-config` in that directory
//! 4. [`ssh_config::parse_ssh_config`] turns the output into [`ssh_config::HostRecord`]s
//! 5. [`inventory::populate`] registers the records with an inventory sink
//!
//! [`resolver::CachedInventoryResolver`] drives steps 2-5 and decides whether
//! the host list may come from the [`cache`] instead.
//!
//! # Modules
//!
//! - [`cache`] - cache trait, key derivation, memory and JSON file backends
//! - [`cli`] - command line (`--list`, `--host`) and logging setup
//! - [`config`] - inventory source file and cache settings
//! - [`constants`] - plugin name, host variable names, defaults
//! - [`core`] - error types and user-facing error reporting
//! - [`inventory`] - inventory sink and the Ansible JSON document
//! - [`resolver`] - cached resolution
//! - [`ssh_config`] - `ssh-config` parser
//! - [`utils`] - filesystem and platform helpers
//! - [`vagrant`] - Vagrantfile lookup and command execution
//!
//! # Inventory Source Format
//!
//! ```yaml
//! plugin: vagrant
//! vagrantfile: ../machines
//! cache: true
//! cache_timeout: 600
//! ```
//!
//! # Command-Line Usage
//!
//! ```bash
//! vagrant-inventory --list
//! vagrant-inventory --host default
//! vagrant-inventory -i lab.yml --list --refresh-cache
//! ```

pub mod cache;
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod inventory;
pub mod resolver;
pub mod ssh_config;
pub mod utils;
pub mod vagrant;

// Test utilities (available in tests and with the test-utils feature)
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

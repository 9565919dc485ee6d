//! Command-line interface of the Vagrant dynamic inventory.
//!
//! The binary speaks the Ansible dynamic inventory protocol: Ansible runs it
//! with `--list` to get every host with its variables, or with `--host NAME`
//! for one host. JSON goes to stdout; logs and errors go to stderr.
//!
//! # Examples
//!
//! ```bash
//! # Full inventory from ./vagrant.yml
//! vagrant-inventory --list
//!
//! # Another source, bypassing a stale cache entry
//! vagrant-inventory -i inventories/lab.yml --list --refresh-cache
//!
//! # Variables of one machine, with debug logging
//! vagrant-inventory -v --host default --pretty
//!
//! # Use with Ansible
//! ansible-inventory -i "$(command -v vagrant-inventory)" --graph
//! ```
//!
//! # Options
//!
//! - `-i, --inventory FILE` - inventory source (default `vagrant.yml`, env `VAGRANT_INVENTORY_CONFIG`)
//! - `--refresh-cache` - ignore the cached host list and rewrite it
//! - `--pretty` - indent JSON output
//! - `-v, --verbose` / `-q, --quiet` - log level

use anyhow::Result;
use clap::{ArgGroup, Parser};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use crate::config::{self, CacheSettings};
use crate::constants::{DEFAULT_INVENTORY_FILE, ENV_INVENTORY_CONFIG};
use crate::inventory::Inventory;
use crate::resolver::CachedInventoryResolver;
use crate::utils::fs::resolve_lenient;
use crate::vagrant::VagrantCli;

/// Runtime options derived from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Log filter used when `RUST_LOG` is unset; `None` disables logging.
    pub log_level: Option<String>,
    /// Whether the cached host list may be used as is.
    pub cache_is_fresh: bool,
}

/// Ansible dynamic inventory for Vagrant machines.
#[derive(Debug, Parser)]
#[command(
    name = "vagrant-inventory",
    about = "Ansible dynamic inventory built from `vagrant ssh-config`",
    version,
    group(ArgGroup::new("mode").required(true).args(["list", "host"]))
)]
pub struct Cli {
    /// Inventory source file.
    #[arg(
        short,
        long,
        value_name = "FILE",
        env = ENV_INVENTORY_CONFIG,
        default_value = DEFAULT_INVENTORY_FILE
    )]
    inventory: PathBuf,

    /// Print the whole inventory.
    #[arg(long)]
    list: bool,

    /// Print the variables of one host (`{}` when unknown).
    #[arg(long, value_name = "NAME")]
    host: Option<String>,

    /// Recompute the inventory and overwrite the cache entry.
    #[arg(long)]
    refresh_cache: bool,

    /// Indent the JSON output.
    #[arg(long)]
    pretty: bool,

    /// Enable debug logging on stderr.
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Disable logging.
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    /// Builds the runtime options implied by the flags.
    ///
    /// `RUST_LOG`, when set, still overrides `log_level` in [`init_logging`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            None
        } else {
            Some("warn".to_string())
        };

        CliConfig {
            log_level,
            cache_is_fresh: !self.refresh_cache,
        }
    }

    /// Runs the requested command and prints its JSON document.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        init_logging(&config);

        let output = self.render(&config).await?;
        println!("{output}");
        Ok(())
    }

    /// Resolves the inventory and returns the JSON text for stdout.
    pub async fn render(&self, config: &CliConfig) -> Result<String> {
        let inventory = load_inventory(&self.inventory, config.cache_is_fresh).await?;

        let document = match &self.host {
            Some(host) => inventory.host_json(host),
            None => inventory.to_json(),
        };

        let text = if self.pretty {
            serde_json::to_string_pretty(&document)?
        } else {
            serde_json::to_string(&document)?
        };
        Ok(text)
    }
}

/// Loads `source`, resolves its hosts through the configured cache and returns
/// the populated inventory.
pub async fn load_inventory(source: &Path, cache_is_fresh: bool) -> Result<Inventory> {
    let source_config = config::load(source)?;
    let settings = CacheSettings::from_env(&source_config)?;
    tracing::debug!(
        target: "cache",
        "Cache {} ({:?}, {})",
        if settings.enabled { "enabled" } else { "disabled" },
        settings.plugin,
        settings.dir.display()
    );

    let source_path = resolve_lenient(source);
    let mut resolver =
        CachedInventoryResolver::new(source_config.vagrantfile, VagrantCli, settings.build());

    let mut inventory = Inventory::new();
    resolver.parse(&mut inventory, &source_path, cache_is_fresh, settings.enabled).await?;
    Ok(inventory)
}

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` takes precedence; otherwise `config.log_level` is used, and no
/// subscriber is installed when it is `None`.
pub fn init_logging(config: &CliConfig) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if let Some(level) = &config.log_level {
        EnvFilter::new(level)
    } else {
        return;
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}

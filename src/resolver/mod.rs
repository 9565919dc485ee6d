//! Cached inventory resolution.
//!
//! [`CachedInventoryResolver`] decides whether the host list of an inventory
//! source comes from the cache or from a fresh `vagrant ssh-config` run, and
//! writes fresh results back. Two caller-supplied flags drive it:
//!
//! | `user_wants_cache` | `cache_is_fresh` | behavior |
//! |---|---|---|
//! | false | any | always compute, never touch the cache |
//! | true | true | read the cache; on a miss compute and write |
//! | true | false | compute and overwrite the cache entry (refresh) |
//!
//! Computing means: locate the Vagrant project, run `ssh-config` in it, parse
//! the output. Any failure aborts the resolution; nothing is retried and no
//! partial result is returned.

use anyhow::Result;
use std::path::Path;

use crate::cache::InventoryCache;
use crate::inventory::{InventorySink, populate};
use crate::ssh_config::{HostRecord, parse_ssh_config};
use crate::vagrant::{SshConfigSource, locate_vagrantfile_dir};

/// Resolves the hosts of one `vagrantfile` option through a cache.
///
/// The ssh-config source and the cache are explicit collaborators, so the
/// resolver holds no global state and tests can substitute both.
///
/// # Examples
///
/// ```rust,no_run
/// use vagrant_inventory::cache::MemoryCache;
/// use vagrant_inventory::inventory::Inventory;
/// use vagrant_inventory::resolver::CachedInventoryResolver;
/// use vagrant_inventory::vagrant::VagrantCli;
/// use std::path::Path;
///
/// # async fn example() -> anyhow::Result<()> {
/// let mut resolver = CachedInventoryResolver::new("../machines", VagrantCli, MemoryCache::new());
/// let mut inventory = Inventory::new();
/// resolver.parse(&mut inventory, Path::new("/srv/inventory/vagrant.yml"), true, true).await?;
/// println!("{}", inventory.to_json());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CachedInventoryResolver<S, C> {
    vagrantfile: String,
    ssh_config: S,
    cache: C,
}

impl<S: SshConfigSource, C: InventoryCache> CachedInventoryResolver<S, C> {
    /// Creates a resolver for the `vagrantfile` option of an inventory source.
    pub fn new(vagrantfile: impl Into<String>, ssh_config: S, cache: C) -> Self {
        Self {
            vagrantfile: vagrantfile.into(),
            ssh_config,
            cache,
        }
    }

    /// The cache collaborator.
    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// The ssh-config source.
    pub fn ssh_config_source(&self) -> &S {
        &self.ssh_config
    }

    /// Computes the host list without consulting the cache.
    ///
    /// A relative `vagrantfile` option is resolved against the directory of
    /// `source_path`.
    pub async fn parse_inventory(&self, source_path: &Path) -> Result<Vec<HostRecord>> {
        let inventory_dir = source_path.parent().unwrap_or_else(|| Path::new(""));
        let vagrant_dir = locate_vagrantfile_dir(&self.vagrantfile, inventory_dir)?;
        let text = self.ssh_config.ssh_config(&vagrant_dir).await?;
        Ok(parse_ssh_config(&text)?)
    }

    /// Returns the hosts of `source_path`, from the cache when allowed.
    pub async fn resolve(
        &mut self,
        source_path: &Path,
        cache_is_fresh: bool,
        user_wants_cache: bool,
    ) -> Result<Vec<HostRecord>> {
        let key = self.cache.cache_key(source_path);
        let attempt_read = user_wants_cache && cache_is_fresh;
        let mut needs_update = user_wants_cache && !cache_is_fresh;

        let mut cached = None;
        if attempt_read {
            cached = self.cache.get(&key).await?;
            if cached.is_none() {
                tracing::debug!(target: "cache", "No cached inventory for {}", key);
                needs_update = true;
            }
        }

        let hosts = match cached {
            Some(hosts) => {
                tracing::debug!(target: "cache", "Using cached inventory for {}", key);
                hosts
            }
            None => self.parse_inventory(source_path).await?,
        };

        if needs_update {
            self.cache.set(&key, &hosts).await?;
        }

        Ok(hosts)
    }

    /// Resolves `source_path` and registers its hosts with `sink`.
    pub async fn parse<K: InventorySink + ?Sized>(
        &mut self,
        sink: &mut K,
        source_path: &Path,
        cache_is_fresh: bool,
        user_wants_cache: bool,
    ) -> Result<()> {
        let hosts = self.resolve(source_path, cache_is_fresh, user_wants_cache).await?;
        populate(sink, hosts);
        Ok(())
    }
}

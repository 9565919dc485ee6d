//! Global constants used throughout the vagrant inventory.
//!
//! Names that form the externally visible contract of the inventory (the
//! plugin identity, the marker file, the host variables handed to Ansible)
//! live here so they are defined exactly once.

/// Name of the inventory plugin, as written in the `plugin:` key of a source file.
pub const PLUGIN_NAME: &str = "vagrant";

/// File whose presence identifies a Vagrant project directory.
pub const VAGRANTFILE: &str = "Vagrantfile";

/// Vagrant subcommand that dumps the OpenSSH client configuration of every machine.
pub const SSH_CONFIG_SUBCOMMAND: &str = "ssh-config";

/// Default inventory source file looked up in the current directory.
pub const DEFAULT_INVENTORY_FILE: &str = "vagrant.yml";

/// Host variable carrying the address Ansible connects to.
pub const VAR_HOST: &str = "ansible_host";

/// Host variable carrying the remote login user.
pub const VAR_USER: &str = "ansible_user";

/// Host variable carrying the remote SSH port.
pub const VAR_PORT: &str = "ansible_port";

/// Host variable disabling host key verification.
///
/// Vagrant machines are recreated freely, so their host keys change; this
/// variable is always emitted as `false`.
pub const VAR_HOST_KEY_CHECKING: &str = "ansible_host_key_checking";

/// Host variable carrying the private key file Vagrant generated for the machine.
pub const VAR_PRIVATE_KEY_FILE: &str = "ansible_ssh_private_key_file";

/// Default lifetime of a cached inventory (1 hour).
pub const DEFAULT_CACHE_TIMEOUT_SECS: u64 = 3600;

/// Default prefix prepended to cache entry file names.
pub const DEFAULT_CACHE_PREFIX: &str = "ansible_inventory_";

/// Environment variable naming the inventory source file.
pub const ENV_INVENTORY_CONFIG: &str = "VAGRANT_INVENTORY_CONFIG";

/// Environment variable enabling the cache when the source file does not say.
pub const ENV_CACHE: &str = "VAGRANT_INVENTORY_CACHE";

/// Environment variable selecting the cache backend.
pub const ENV_CACHE_PLUGIN: &str = "VAGRANT_INVENTORY_CACHE_PLUGIN";

/// Environment variable overriding the cache entry lifetime in seconds.
pub const ENV_CACHE_TIMEOUT: &str = "VAGRANT_INVENTORY_CACHE_TIMEOUT";

/// Environment variable overriding the cache directory.
pub const ENV_CACHE_DIR: &str = "VAGRANT_INVENTORY_CACHE_DIR";

/// Directory name used below the platform cache directory.
pub const CACHE_DIR_NAME: &str = "vagrant-inventory";

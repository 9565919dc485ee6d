//! Ansible inventory sink.
//!
//! Parsed [`HostRecord`]s are registered with an [`InventorySink`] by
//! [`populate`], which assigns the fixed set of connection variables Ansible
//! uses to reach a Vagrant machine. [`Inventory`] is the sink used by the
//! binary; it renders the JSON documents of the dynamic inventory protocol:
//!
//! ```json
//! {
//!   "_meta": { "hostvars": { "default": { "ansible_host": "127.0.0.1", "ansible_port": 2222 } } },
//!   "all": { "hosts": ["default"] }
//! }
//! ```

use serde_json::{Map, Value, json};
use std::collections::HashMap;

use crate::constants::{VAR_HOST, VAR_HOST_KEY_CHECKING, VAR_PORT, VAR_PRIVATE_KEY_FILE, VAR_USER};
use crate::ssh_config::HostRecord;

/// Receiver of hosts and their variables.
pub trait InventorySink {
    /// Registers `host`. Registering a host twice keeps its first position.
    fn add_host(&mut self, host: &str);

    /// Sets variable `name` of an already registered `host`.
    fn set_variable(&mut self, host: &str, name: &str, value: Value);
}

/// Registers every record with `sink` and sets its connection variables.
///
/// Variables whose source field is missing from a record are not set.
/// `ansible_host_key_checking` is always `false`.
pub fn populate<S: InventorySink + ?Sized>(sink: &mut S, hosts: Vec<HostRecord>) {
    for record in hosts {
        let name = record.host;
        sink.add_host(&name);

        if let Some(hostname) = record.hostname {
            sink.set_variable(&name, VAR_HOST, Value::String(hostname));
        }
        if let Some(user) = record.user {
            sink.set_variable(&name, VAR_USER, Value::String(user));
        }
        if let Some(port) = record.port {
            sink.set_variable(&name, VAR_PORT, Value::from(port));
        }
        sink.set_variable(&name, VAR_HOST_KEY_CHECKING, Value::Bool(false));
        if let Some(key) = record.sshkey {
            sink.set_variable(&name, VAR_PRIVATE_KEY_FILE, Value::String(key));
        }
    }
}

/// In-memory inventory of hosts in registration order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Inventory {
    hosts: Vec<String>,
    hostvars: HashMap<String, Map<String, Value>>,
}

impl Inventory {
    /// Creates an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Host names in registration order.
    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    /// Variables of `host`, or `None` when it is not registered.
    pub fn host_vars(&self, host: &str) -> Option<&Map<String, Value>> {
        self.hostvars.get(host)
    }

    /// Variables of `host` as a JSON object, empty for unknown hosts (`--host`).
    pub fn host_json(&self, host: &str) -> Value {
        Value::Object(self.host_vars(host).cloned().unwrap_or_default())
    }

    /// The complete inventory document (`--list`).
    pub fn to_json(&self) -> Value {
        let hostvars: Map<String, Value> = self
            .hosts
            .iter()
            .map(|host| (host.clone(), self.host_json(host)))
            .collect();

        json!({
            "_meta": { "hostvars": hostvars },
            "all": { "hosts": self.hosts },
        })
    }
}

impl InventorySink for Inventory {
    fn add_host(&mut self, host: &str) {
        if !self.hostvars.contains_key(host) {
            self.hosts.push(host.to_string());
            self.hostvars.insert(host.to_string(), Map::new());
        }
    }

    fn set_variable(&mut self, host: &str, name: &str, value: Value) {
        match self.hostvars.get_mut(host) {
            Some(vars) => {
                vars.insert(name.to_string(), value);
            }
            None => tracing::warn!("Ignoring variable {} for unregistered host {}", name, host),
        }
    }
}

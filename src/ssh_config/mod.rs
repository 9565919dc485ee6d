//! Parser for the OpenSSH client configuration printed by `vagrant ssh-config`.
//!
//! Vagrant describes every machine of a project as one `Host` block:
//!
//! ```text
//! Host default
//!   HostName 127.0.0.1
//!   User vagrant
//!   Port 2222
//!   UserKnownHostsFile /dev/null
//!   StrictHostKeyChecking no
//!   PasswordAuthentication no
//!   IdentityFile /home/me/project/.vagrant/machines/default/virtualbox/private_key
//!   IdentitiesOnly yes
//!   LogLevel FATAL
//! ```
//!
//! [`parse_ssh_config`] turns that text into an ordered list of [`HostRecord`]s.
//! Only `Host`, `HostName`, `User`, `Port` and `IdentityFile` are interpreted;
//! every other directive is skipped so new Vagrant output does not break the
//! inventory.
//!
//! # Line handling
//!
//! Each line is normalized before it is classified: leading and trailing
//! whitespace is removed and inner runs of whitespace collapse to one space.
//! The keyword is the first token and the value is everything after it. A
//! keyword with no value is ignored.
//!
//! A record is finalized when the next `Host` line starts or the input ends.
//! Directives that appear before the first `Host` line belong to no host and
//! are dropped. When a directive repeats inside one block the last value wins.

use serde::{Deserialize, Serialize};

use crate::core::InventoryError;

/// One SSH destination described by a `Host` block.
///
/// Only `host` is guaranteed; the other fields stay `None` when the block
/// does not contain the matching directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostRecord {
    /// Value of the `Host` line, the machine name Vagrant uses.
    pub host: String,
    /// Value of `HostName`: the address to connect to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    /// Value of `User`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Value of `Port`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    /// Value of `IdentityFile`: path of the private key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sshkey: Option<String>,
}

impl HostRecord {
    /// Creates a record holding only its host name.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            hostname: None,
            user: None,
            port: None,
            sshkey: None,
        }
    }
}

/// The directives the parser understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Directive {
    /// Starts a new host block.
    Host,
    /// Sets a field of the current host block.
    Field(Field),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    HostName,
    User,
    Port,
    IdentityFile,
}

impl Directive {
    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "Host" => Some(Self::Host),
            "HostName" => Some(Self::Field(Field::HostName)),
            "User" => Some(Self::Field(Field::User)),
            "Port" => Some(Self::Field(Field::Port)),
            "IdentityFile" => Some(Self::Field(Field::IdentityFile)),
            _ => None,
        }
    }
}

impl Field {
    /// Stores `value` on `record`. `line` is only used for error reporting.
    fn apply(self, record: &mut HostRecord, value: &str, line: usize) -> Result<(), InventoryError> {
        match self {
            Self::HostName => record.hostname = Some(value.to_string()),
            Self::User => record.user = Some(value.to_string()),
            Self::IdentityFile => record.sshkey = Some(value.to_string()),
            Self::Port => {
                let port = value.parse::<u16>().map_err(|source| InventoryError::InvalidPort {
                    line,
                    value: value.to_string(),
                    source,
                })?;
                record.port = Some(port);
            }
        }
        Ok(())
    }
}

/// Collapses whitespace runs to single spaces and trims both ends.
fn normalize_line(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parses `vagrant ssh-config` output into host records, in order of appearance.
///
/// # Errors
///
/// Returns [`InventoryError::InvalidPort`] when a `Port` value is not a valid
/// port number. No records are returned in that case.
///
/// # Examples
///
/// ```rust
/// use vagrant_inventory::ssh_config::parse_ssh_config;
///
/// let hosts = parse_ssh_config("Host web\n  HostName 10.0.0.5\n  Port 22\n").unwrap();
/// assert_eq!(hosts.len(), 1);
/// assert_eq!(hosts[0].host, "web");
/// assert_eq!(hosts[0].hostname.as_deref(), Some("10.0.0.5"));
/// assert_eq!(hosts[0].port, Some(22));
/// ```
pub fn parse_ssh_config(text: &str) -> Result<Vec<HostRecord>, InventoryError> {
    let mut hosts = Vec::new();
    let mut current: Option<HostRecord> = None;

    for (index, raw_line) in text.split('\n').enumerate() {
        let line = normalize_line(raw_line);
        let Some((keyword, value)) = line.split_once(' ') else {
            continue;
        };
        let Some(directive) = Directive::from_keyword(keyword) else {
            continue;
        };

        match directive {
            Directive::Host => {
                if let Some(finished) = current.replace(HostRecord::new(value)) {
                    hosts.push(finished);
                }
            }
            Directive::Field(field) => match current.as_mut() {
                Some(record) => field.apply(record, value, index + 1)?,
                None => tracing::trace!("Ignoring '{}' before the first Host line", line),
            },
        }
    }

    if let Some(finished) = current {
        hosts.push(finished);
    }

    tracing::debug!("Parsed {} host(s) from ssh-config output", hosts.len());
    Ok(hosts)
}

//! Error handling for the vagrant inventory
//!
//! This module provides the strongly-typed error enum used across the crate and
//! the user-facing [`ErrorContext`] the binary prints when a resolution fails.
//!
//! # Error Categories
//!
//! - **Vagrantfile location**: [`InventoryError::VagrantfileNotFound`]
//! - **External command**: [`InventoryError::VagrantCommandError`]
//! - **ssh-config parsing**: [`InventoryError::InvalidPort`]
//! - **Inventory source file**: [`InventoryError::ConfigNotFound`],
//!   [`InventoryError::ConfigError`], [`InventoryError::UnsupportedPlugin`]
//!
//! Every error is fatal to a single resolution; nothing in this crate retries.
//! A cache miss is not an error and never appears here.
//!
//! # Examples
//!
//! ```rust,no_run
//! use vagrant_inventory::core::{InventoryError, user_friendly_error};
//!
//! let error = InventoryError::VagrantfileNotFound {
//!     path: "/srv/vms".to_string(),
//!     reason: "directory does not contain Vagrantfile".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // Colored error, details and suggestion on stderr
//! ```

use colored::Colorize;
use std::fmt;
use std::num::ParseIntError;
use thiserror::Error;

use crate::constants::{PLUGIN_NAME, VAGRANTFILE};
use crate::utils::platform::{command_exists, get_vagrant_command};

/// The main error type for inventory resolution.
#[derive(Error, Debug)]
pub enum InventoryError {
    /// The configured `vagrantfile` option does not resolve to a Vagrantfile
    /// or to a directory containing one.
    ///
    /// # Fields
    /// - `path`: The resolved path that was inspected
    /// - `reason`: Which rule the path failed
    #[error("{reason}: {path}")]
    VagrantfileNotFound {
        /// The resolved path that was inspected
        path: String,
        /// Which rule the path failed
        reason: String,
    },

    /// `vagrant ssh-config` could not be launched, exited non-zero, or produced
    /// output that is not UTF-8.
    #[error("\"{command}\" failed with: {reason}")]
    VagrantCommandError {
        /// The command line that was run
        command: String,
        /// Description of the underlying failure
        reason: String,
    },

    /// A `Port` directive carried a value that is not a valid port number.
    #[error("Invalid Port value '{value}' on line {line} of ssh-config output")]
    InvalidPort {
        /// 1-based line number in the ssh-config output
        line: usize,
        /// The offending value
        value: String,
        /// The numeric conversion failure
        #[source]
        source: ParseIntError,
    },

    /// The inventory source file does not exist or cannot be read.
    #[error("Inventory source not found or not readable: {path}")]
    ConfigNotFound {
        /// Path of the inventory source file
        path: String,
    },

    /// The inventory source file is not valid.
    #[error("Invalid inventory source {file}: {reason}")]
    ConfigError {
        /// Path of the inventory source file
        file: String,
        /// What is wrong with it
        reason: String,
    },

    /// The inventory source file names a different plugin.
    #[error("{file} is not a vagrant inventory source (plugin: {plugin})")]
    UnsupportedPlugin {
        /// Path of the inventory source file
        file: String,
        /// The plugin name found in the file
        plugin: String,
    },

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

/// Error wrapper carrying a suggestion and extra details for CLI display.
///
/// # Examples
///
/// ```rust,no_run
/// use vagrant_inventory::core::{ErrorContext, InventoryError};
///
/// let context = ErrorContext::new(InventoryError::Other { message: "boom".into() })
///     .with_suggestion("Run with --verbose for more information")
///     .with_details("Resolution stopped before any host was registered");
///
/// println!("{}", context);
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: InventoryError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: InventoryError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error context to stderr with terminal colors.
    ///
    /// - Error message: red and bold
    /// - Details: yellow
    /// - Suggestion: green
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// Recognizes [`InventoryError`] variants and [`std::io::Error`]; anything else is
/// reported with its full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let error = match error.downcast::<InventoryError>() {
        Ok(inventory_error) => return create_error_context(inventory_error),
        Err(error) => error,
    };

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(InventoryError::Other {
                    message: format!("Permission denied: {io_error}"),
                })
                .with_suggestion("Check the permissions of the inventory source and cache directory")
                .with_details("The inventory could not read or write a file it needs");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(InventoryError::Other {
                    message: format!("File not found: {io_error}"),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct");
            }
            _ => {}
        }
    }

    // Generic error - include the full error chain for better diagnostics
    let mut message = error.to_string();
    let chain: Vec<String> =
        error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(InventoryError::Other {
        message,
    })
}

/// Attach the suggestion and details matching a specific [`InventoryError`].
fn create_error_context(error: InventoryError) -> ErrorContext {
    match &error {
        InventoryError::VagrantfileNotFound { .. } => ErrorContext::new(error)
            .with_suggestion(format!(
                "Point the 'vagrantfile' option at a {VAGRANTFILE} or the directory containing it"
            ))
            .with_details("Relative paths are resolved from the directory of the inventory source file"),

        InventoryError::VagrantCommandError { .. } => {
            let vagrant = get_vagrant_command();
            if command_exists(vagrant) {
                ErrorContext::new(error)
                    .with_suggestion("Run 'vagrant ssh-config' in the Vagrant project directory to see the full output")
                    .with_details("Vagrant reports an error when machines are not created or not running")
            } else {
                ErrorContext::new(error)
                    .with_suggestion("Install Vagrant from https://developer.hashicorp.com/vagrant/install and make sure it is on your PATH")
                    .with_details(format!("The '{vagrant}' executable was not found in PATH"))
            }
        }

        InventoryError::InvalidPort { .. } => ErrorContext::new(error)
            .with_suggestion("Check the output of 'vagrant ssh-config'; every Port line must hold a number between 0 and 65535")
            .with_details("No hosts were registered because the ssh-config output could not be parsed"),

        InventoryError::ConfigNotFound { .. } => ErrorContext::new(error)
            .with_suggestion("Pass the inventory source with --inventory or set VAGRANT_INVENTORY_CONFIG"),

        InventoryError::ConfigError { .. } => ErrorContext::new(error)
            .with_suggestion(format!(
                "The source must be YAML with at least 'plugin: {PLUGIN_NAME}' and a 'vagrantfile' path"
            )),

        InventoryError::UnsupportedPlugin { .. } => ErrorContext::new(error)
            .with_suggestion(format!("Set 'plugin: {PLUGIN_NAME}' in the inventory source")),

        InventoryError::Other { .. } => ErrorContext::new(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = InventoryError::VagrantfileNotFound {
            path: "/srv/vms".to_string(),
            reason: "directory does not contain Vagrantfile".to_string(),
        };
        assert_eq!(error.to_string(), "directory does not contain Vagrantfile: /srv/vms");

        let error = InventoryError::VagrantCommandError {
            command: "vagrant ssh-config".to_string(),
            reason: "exit status: 1".to_string(),
        };
        assert_eq!(error.to_string(), "\"vagrant ssh-config\" failed with: exit status: 1");

        let error = InventoryError::UnsupportedPlugin {
            file: "hosts.yml".to_string(),
            plugin: "aws_ec2".to_string(),
        };
        assert_eq!(error.to_string(), "hosts.yml is not a vagrant inventory source (plugin: aws_ec2)");
    }

    #[test]
    fn test_invalid_port_keeps_source() {
        use std::error::Error;

        let source = "ssh".parse::<u16>().unwrap_err();
        let error = InventoryError::InvalidPort {
            line: 4,
            value: "ssh".to_string(),
            source,
        };
        assert!(error.to_string().contains("'ssh'"));
        assert!(error.to_string().contains("line 4"));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_error_context_display() {
        let ctx = ErrorContext::new(InventoryError::Other {
            message: "boom".to_string(),
        })
        .with_suggestion("Try again")
        .with_details("Something broke");

        let display = format!("{ctx}");
        assert!(display.starts_with("boom"));
        assert!(display.contains("Details: Something broke"));
        assert!(display.contains("Suggestion: Try again"));
    }

    #[test]
    fn test_user_friendly_error_keeps_variant() {
        let error = InventoryError::VagrantfileNotFound {
            path: "/nowhere".to_string(),
            reason: "directory does not contain Vagrantfile".to_string(),
        };

        let ctx = user_friendly_error(anyhow::Error::from(error));
        assert!(matches!(ctx.error, InventoryError::VagrantfileNotFound { .. }));
        assert!(ctx.suggestion.is_some());
    }

    #[test]
    fn test_user_friendly_error_through_context() {
        use anyhow::Context;

        let result: anyhow::Result<()> = Err(InventoryError::ConfigNotFound {
            path: "vagrant.yml".to_string(),
        })
        .context("loading inventory source");

        let ctx = user_friendly_error(result.unwrap_err());
        assert!(matches!(ctx.error, InventoryError::ConfigNotFound { .. }));
    }

    #[test]
    fn test_user_friendly_error_permission_denied() {
        use std::io::{Error, ErrorKind};

        let io_error = Error::new(ErrorKind::PermissionDenied, "access denied");
        let ctx = user_friendly_error(anyhow::Error::from(io_error));
        assert!(ctx.error.to_string().contains("Permission denied"));
        assert!(ctx.suggestion.is_some());
    }

    #[test]
    fn test_user_friendly_error_generic_chain() {
        let error = anyhow::anyhow!("root cause").context("outer failure");
        let ctx = user_friendly_error(error);

        let message = ctx.error.to_string();
        assert!(message.starts_with("outer failure"));
        assert!(message.contains("Caused by:"));
        assert!(message.contains("root cause"));
    }
}

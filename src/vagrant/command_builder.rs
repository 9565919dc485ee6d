//! Builder for Vagrant command execution
//!
//! Provides a fluent API for running the `vagrant` executable with captured
//! output and uniform error mapping. Every failure mode (the executable cannot
//! be started, it exits non-zero, or it prints something that is not UTF-8)
//! surfaces as [`InventoryError::VagrantCommandError`]; no raw process error
//! leaves this module.

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

use crate::constants::SSH_CONFIG_SUBCOMMAND;
use crate::core::InventoryError;
use crate::utils::platform::get_vagrant_command;

/// Builder for constructing and executing Vagrant commands.
///
/// Output is always captured; stdin is closed so Vagrant can never block on a
/// prompt. No timeout is applied.
///
/// # Examples
///
/// ```rust,no_run
/// use vagrant_inventory::vagrant::command_builder::VagrantCommand;
///
/// # async fn example() -> anyhow::Result<()> {
/// let output = VagrantCommand::ssh_config()
///     .current_dir("/home/me/machines")
///     .execute()
///     .await?;
/// println!("{}", output.stdout);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct VagrantCommand {
    /// Arguments passed to Vagrant (e.g., `["ssh-config"]`)
    args: Vec<String>,

    /// Working directory; Vagrant finds its project from here
    current_dir: Option<PathBuf>,

    /// Optional context string included in log lines
    context: Option<String>,
}

impl VagrantCommand {
    /// Creates an empty command.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates `vagrant ssh-config`.
    pub fn ssh_config() -> Self {
        Self::new().arg(SSH_CONFIG_SUBCOMMAND)
    }

    /// Sets the working directory for execution.
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Adds a single argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Sets a context for logging (e.g., the inventory source being resolved).
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// The command line as shown in logs and error messages.
    fn display_command(&self) -> String {
        let mut parts = vec!["vagrant".to_string()];
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }

    /// Execute the command and return its output.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::VagrantCommandError`] when the process cannot be
    /// started, exits unsuccessfully, or writes non-UTF-8 data to stdout.
    pub async fn execute(self) -> Result<VagrantCommandOutput> {
        let start = std::time::Instant::now();
        let command_line = self.display_command();
        let prefix = self.context.as_ref().map(|ctx| format!("({ctx}) ")).unwrap_or_default();

        let mut cmd = Command::new(get_vagrant_command());
        cmd.args(&self.args);
        if let Some(ref dir) = self.current_dir {
            cmd.current_dir(dir);
            tracing::debug!(
                target: "vagrant",
                "{}Executing command: {} (in {})",
                prefix,
                command_line,
                dir.display()
            );
        } else {
            tracing::debug!(target: "vagrant", "{}Executing command: {}", prefix, command_line);
        }
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let output = cmd.output().await.map_err(|e| {
            tracing::debug!(target: "vagrant", "{}Failed to start: {}", prefix, e);
            InventoryError::VagrantCommandError {
                command: command_line.clone(),
                reason: format!("cannot start {}: {e}", get_vagrant_command()),
            }
        })?;

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if !output.status.success() {
            tracing::debug!(
                target: "vagrant",
                "{}Command failed with exit code: {:?}",
                prefix,
                output.status.code()
            );
            if !stderr.is_empty() {
                tracing::debug!(target: "vagrant", "{}Error: {}", prefix, stderr);
            }

            let reason = if stderr.is_empty() {
                output.status.to_string()
            } else {
                format!("{}: {}", output.status, stderr)
            };
            return Err(InventoryError::VagrantCommandError {
                command: command_line,
                reason,
            }
            .into());
        }

        let stdout = String::from_utf8(output.stdout).map_err(|e| {
            InventoryError::VagrantCommandError {
                command: command_line.clone(),
                reason: format!("output is not valid UTF-8: {e}"),
            }
        })?;

        let elapsed = start.elapsed();
        if elapsed.as_secs() > 1 {
            tracing::info!(
                target: "vagrant::perf",
                "{}{} took {:.2}s",
                prefix,
                command_line,
                elapsed.as_secs_f64()
            );
        } else {
            tracing::debug!(
                target: "vagrant::perf",
                "{}{} took {}ms",
                prefix,
                command_line,
                elapsed.as_millis()
            );
        }

        Ok(VagrantCommandOutput {
            stdout,
            stderr,
        })
    }
}

/// Output from a Vagrant command
#[derive(Debug)]
pub struct VagrantCommandOutput {
    /// Standard output, verbatim
    pub stdout: String,
    /// Standard error, trimmed; Vagrant prints deprecation and plugin warnings
    /// here even when it succeeds
    pub stderr: String,
}

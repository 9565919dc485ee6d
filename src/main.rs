//! vagrant-inventory entry point
//!
//! Parses the command line, prints the requested inventory document and maps
//! failures to a colored error report on stderr with exit status 1.

use anyhow::Result;
use clap::Parser;
use vagrant_inventory::cli;
use vagrant_inventory::core::error::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}

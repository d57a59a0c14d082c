//! update-golang CLI entry point
//!
//! Parses the command line, runs the upgrade pipeline and turns any failure
//! into a coloured error message with a suggestion, exiting with status 1.

use anyhow::Result;
use clap::Parser;
use update_golang::cli;
use update_golang::core::error::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}

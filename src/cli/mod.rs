//! Command-line interface for update-golang.
//!
//! There are no subcommands: a single invocation runs the whole upgrade
//! pipeline. Flags are parsed into a [`Cli`], split into a [`CliConfig`]
//! (logging and output settings) and an
//! [`UpgradeConfig`](crate::upgrade::UpgradeConfig) (what to install and
//! where), then handed to [`crate::upgrade::run`].
//!
//! # Options
//!
//! - `-v`, `--version <go1.X.Y>` - install this release instead of the latest
//! - `--keep-archive` - leave the downloaded archive in place
//! - `--timeout <seconds>` - deadline for version lookup plus download
//! - `--skip-privilege-check` - do not probe the install root before starting
//! - `--no-progress` - no progress bars (also `UPDATE_GOLANG_NO_PROGRESS=1`)
//! - `--verbose` / `-q`, `--quiet` - log level `debug` / `error`
//!
//! `-v` selects the Go release, so the tool has no flag printing its own
//! version.
//!
//! # Environment
//!
//! Hidden overrides used by tests and mirror setups:
//!
//! | Variable | Default |
//! |----------|---------|
//! | `UPDATE_GOLANG_LISTING_URL` | `https://go.dev/dl/` |
//! | `UPDATE_GOLANG_DOWNLOAD_BASE` | `https://go.dev/dl` |
//! | `UPDATE_GOLANG_INSTALL_ROOT` | `/usr/local` |
//! | `UPDATE_GOLANG_DOWNLOAD_DIR` | `.` |
//!
//! `RUST_LOG`, when set, takes precedence over `--verbose` and `--quiet`.
//!
//! # Example
//!
//! ```bash
//! sudo update-golang                    # newest release
//! sudo update-golang -v go1.22.8        # pinned release
//! sudo update-golang --keep-archive --no-progress
//! ```

#[cfg(test)]
mod tests;

use crate::constants::{DEFAULT_INSTALL_ROOT, GO_DOWNLOAD_BASE_URL, GO_DOWNLOAD_PAGE_URL};
use crate::upgrade::cleaner::CleanOutcome;
use crate::upgrade::download::FetchOutcome;
use crate::upgrade::{UpgradeConfig, UpgradeReport};
use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Output settings derived from the command line.
///
/// Kept separate from [`UpgradeConfig`] so that tests can check the flag
/// translation without installing a global subscriber.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Filter used when `RUST_LOG` is not set.
    pub log_level: String,

    /// Suppress the human-readable status lines on stdout.
    pub quiet: bool,
}

impl CliConfig {
    /// Install a stderr `tracing` subscriber for this run.
    ///
    /// Does nothing if a global subscriber already exists.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.log_level));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Download and install the latest (or a pinned) Go toolchain.
#[derive(Parser, Debug)]
#[command(
    name = "update-golang",
    about = "Replace the system Go toolchain with a release from go.dev",
    author,
    disable_version_flag = true,
    long_about = "Finds the newest Go release (or uses --version), downloads the linux-amd64 \
                  archive, removes the existing toolchain directory and unpacks the new one in its place."
)]
pub struct Cli {
    /// Release to install, e.g. go1.23.2. Defaults to the newest stable release.
    #[arg(short = 'v', long = "version", value_name = "VERSION")]
    version: Option<String>,

    /// Keep the downloaded archive after a successful install.
    ///
    /// A kept archive is reused by the next run for the same release, which
    /// then needs no download.
    #[arg(long)]
    keep_archive: bool,

    /// Seconds allowed for the version lookup and download together.
    #[arg(
        long,
        value_name = "SECONDS",
        default_value_t = 300,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    timeout: u64,

    /// Do not check for write access to the install root before starting.
    #[arg(long)]
    skip_privilege_check: bool,

    /// Disable progress bars.
    #[arg(long, env = "UPDATE_GOLANG_NO_PROGRESS")]
    no_progress: bool,

    /// Enable debug logging.
    #[arg(long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only print errors.
    #[arg(short, long)]
    quiet: bool,

    #[arg(long, env = "UPDATE_GOLANG_LISTING_URL", default_value = GO_DOWNLOAD_PAGE_URL, hide = true)]
    listing_url: String,

    #[arg(long, env = "UPDATE_GOLANG_DOWNLOAD_BASE", default_value = GO_DOWNLOAD_BASE_URL, hide = true)]
    download_base: String,

    #[arg(long, env = "UPDATE_GOLANG_INSTALL_ROOT", default_value = DEFAULT_INSTALL_ROOT, hide = true)]
    install_root: PathBuf,

    #[arg(long, env = "UPDATE_GOLANG_DOWNLOAD_DIR", default_value = ".", hide = true)]
    download_dir: PathBuf,
}

impl Cli {
    /// Set up logging and run the upgrade described by the parsed flags.
    pub async fn execute(self) -> Result<()> {
        let cli_config = self.build_config();
        cli_config.init_logging();
        let upgrade_config = self.upgrade_config();
        self.execute_with_config(&cli_config, &upgrade_config).await
    }

    /// Translate the verbosity flags.
    ///
    /// `--verbose` maps to `debug`, `--quiet` to `error`, anything else to
    /// `info`.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        };

        CliConfig {
            log_level: log_level.to_string(),
            quiet: self.quiet,
        }
    }

    /// The pipeline settings selected on the command line. Quiet runs also
    /// hide progress bars.
    #[must_use]
    pub fn upgrade_config(&self) -> UpgradeConfig {
        UpgradeConfig {
            version: self.version.clone(),
            listing_url: self.listing_url.clone(),
            download_base: self.download_base.clone(),
            download_dir: self.download_dir.clone(),
            install_root: self.install_root.clone(),
            keep_archive: self.keep_archive,
            network_timeout: Duration::from_secs(self.timeout),
            check_privileges: !self.skip_privilege_check,
            show_progress: !(self.no_progress || self.quiet),
        }
    }

    /// Run the pipeline with explicit settings and print the outcome.
    pub async fn execute_with_config(
        &self,
        cli_config: &CliConfig,
        upgrade_config: &UpgradeConfig,
    ) -> Result<()> {
        if !cli_config.quiet {
            let target = upgrade_config.version.as_deref().unwrap_or("the latest release");
            println!(
                "{}",
                format!("Installing {} into {}...", target, upgrade_config.install_dir().display())
                    .cyan()
            );
        }

        let report = crate::upgrade::run(upgrade_config).await?;

        if !cli_config.quiet {
            print_report(&report);
        }
        Ok(())
    }
}

fn print_report(report: &UpgradeReport) {
    match report.fetch {
        FetchOutcome::Downloaded {
            bytes,
        } => println!("Downloaded {} ({} bytes)", report.archive.display(), bytes),
        FetchOutcome::AlreadyPresent => {
            println!("Reused existing archive {}", report.archive.display());
        }
    }

    if report.clean == CleanOutcome::Removed {
        println!("Removed previous installation at {}", report.install_dir.display());
    }

    println!(
        "{}",
        format!(
            "Installed {} into {} ({} files, {} executables)",
            report.version,
            report.install_dir.display(),
            report.extract.files,
            report.extract.executables
        )
        .green()
    );

    if !report.archive_removed {
        println!("Archive kept at {}", report.archive.display());
    }
}

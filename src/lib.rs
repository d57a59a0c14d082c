//! update-golang - replace the system Go toolchain with a fresh release
//!
//! One run performs a fixed sequence of steps against a single install
//! location (by default `/usr/local/go`):
//!
//! 1. find the newest release on `https://go.dev/dl/`, or take `--version`
//! 2. download `<version>.linux-amd64.tar.gz`, unless it is already on disk
//! 3. delete the existing toolchain directory
//! 4. unpack the archive, marking extension-less files executable
//! 5. delete the archive (unless `--keep-archive`)
//!
//! The first failing step ends the run; nothing is retried or rolled back.
//!
//! # Modules
//!
//! - [`cli`] - argument parsing, logging setup and result output
//! - [`constants`] - URLs, paths, modes and timeouts
//! - [`core`] - error types and user-facing error rendering
//! - [`upgrade`] - the pipeline and its individual steps
//! - [`utils`] - privilege checks and progress bars
//!
//! # Library usage
//!
//! ```rust,no_run
//! use update_golang::upgrade::{UpgradeConfig, run};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let mut config = UpgradeConfig::new();
//! config.install_root = "/opt".into();
//! config.show_progress = false;
//!
//! let report = run(&config).await?;
//! println!("now on {}", report.version);
//! # Ok(())
//! # }
//! ```
//!
//! # Command-Line Usage
//!
//! ```bash
//! sudo update-golang
//! sudo update-golang --version go1.22.8 --keep-archive
//! ```

pub mod cli;
pub mod constants;
pub mod core;
pub mod upgrade;
pub mod utils;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

//! Replacing the system Go toolchain with a release from go.dev.
//!
//! # Process
//!
//! ```text
//! 1. Resolve version   --version value, or newest release on the listing page
//! 2. Fetch             <version>.linux-amd64.tar.gz into the download dir,
//!                      skipped when the file is already there
//! 3. Clean             rm -rf <install_root>/go
//! 4. Extract           unpack the archive into <install_root>
//! 5. Cleanup           delete the archive (unless --keep-archive)
//! ```
//!
//! Steps 1 and 2 share a network deadline. A failed extraction is not rolled
//! back; running again redoes steps 3 and 4 from the cached archive.
//!
//! # Modules
//!
//! - [`version_check`]: listing-page scraping and version overrides
//! - [`download`]: archive URL derivation and streaming download
//! - [`cleaner`]: removal of the previous toolchain
//! - [`extract`]: tar.gz unpacking with executable-bit fixup
//! - [`pipeline`]: the ordered run over all of the above
//! - [`config`]: per-run settings

pub mod cleaner;
pub mod config;
pub mod download;
pub mod extract;
pub mod pipeline;
pub mod version_check;

pub use config::UpgradeConfig;
pub use pipeline::{Stage, UpgradeReport, run};
pub use version_check::VersionIdentifier;

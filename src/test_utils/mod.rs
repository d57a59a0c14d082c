//! Test utilities for update-golang
//!
//! Shared by the unit tests and, through the `test-utils` feature, by the
//! integration tests under `tests/`:
//! - [`init_test_logging`] wires `tracing` output into the test harness
//! - [`ArchiveFixture`] builds release-shaped `.tar.gz` archives
//! - [`listing_page`] renders a release listing page for a given version

pub mod fixtures;

pub use fixtures::{ArchiveFixture, listing_page};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has any effect. With `level` set that level is used;
/// otherwise `RUST_LOG` is honoured, and without either no subscriber is
/// installed.
///
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}

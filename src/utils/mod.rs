//! Helpers shared by the upgrade steps.
//!
//! - [`platform`] - privilege checks before the install root is modified
//! - [`progress`] - byte progress bars for download and extraction

pub mod platform;
pub mod progress;

pub use platform::{ensure_privileged, is_root};
pub use progress::{ProgressBar, ProgressStyle};

//! Integration test suite for update-golang
//!
//! These tests run the compiled binary against a local mock of the release
//! server, installing into temporary directories.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! - **cli**: argument handling, help output and exit codes
//! - **upgrade**: full upgrade runs and their effect on disk

#[path = "../common/mod.rs"]
mod common;

mod cli;
mod upgrade;

//! Core types shared by every part of update-golang.
//!
//! Currently this is the error model: [`UpdateError`] for typed failures and
//! [`ErrorContext`] for rendering them with suggestions.

pub mod error;

pub use error::{ErrorContext, UpdateError, user_friendly_error};

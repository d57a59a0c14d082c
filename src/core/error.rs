//! Error handling for update-golang
//!
//! The error system follows two rules:
//! 1. **Strongly-typed errors** ([`UpdateError`]) for every failure a pipeline
//!    step can report, each carrying the URL or path involved.
//! 2. **User-friendly messages** ([`ErrorContext`]) with details and an
//!    actionable suggestion when the error reaches the terminal.
//!
//! Steps return [`UpdateError`] values wrapped in [`anyhow::Error`]; the
//! orchestrator adds the name of the failing step as context, and `main`
//! converts the final error with [`user_friendly_error`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use update_golang::core::{UpdateError, user_friendly_error};
//!
//! let err = anyhow::Error::new(UpdateError::NotFound {
//!     marker: r#"class="toggleVisible""#.to_string(),
//!     url: "https://go.dev/dl/".to_string(),
//! });
//! user_friendly_error(err).display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// Every failure kind the upgrade pipeline can produce.
#[derive(Error, Debug, Clone)]
pub enum UpdateError {
    /// A request failed, timed out, or returned a non-success status.
    #[error("Network error while requesting {url}: {reason}")]
    Network {
        /// URL of the failed request
        url: String,
        /// Transport error or HTTP status
        reason: String,
    },

    /// The version pattern could not be found or validated.
    #[error("Could not parse a Go version from '{input}': {reason}")]
    Parse {
        /// Text that was searched or validated
        input: String,
        /// Why the text was rejected
        reason: String,
    },

    /// The listing page no longer contains the latest-release marker.
    #[error("Marker {marker} not found on release listing {url}")]
    NotFound {
        /// Substring that was searched for
        marker: String,
        /// Page that was scanned
        url: String,
    },

    /// Creating, writing, removing or chmod-ing a path failed.
    #[error("File system error: {operation} {path}: {reason}")]
    FileSystem {
        /// What was being attempted (e.g. "remove directory")
        operation: String,
        /// Path the operation targeted
        path: String,
        /// Underlying cause
        reason: String,
    },

    /// The current user cannot modify the install location.
    #[error("Permission denied: {operation} {path}")]
    PermissionDenied {
        /// What was being attempted
        operation: String,
        /// Path that could not be modified
        path: String,
    },

    #[error("{message}")]
    Other {
        message: String,
    },
}

impl UpdateError {
    /// Build a [`UpdateError::FileSystem`] or, for permission denials, a
    /// [`UpdateError::PermissionDenied`] from an I/O error.
    pub fn from_io(
        operation: impl Into<String>,
        path: &std::path::Path,
        error: &std::io::Error,
    ) -> Self {
        let operation = operation.into();
        let path = path.display().to_string();
        if error.kind() == std::io::ErrorKind::PermissionDenied {
            Self::PermissionDenied {
                operation,
                path,
            }
        } else {
            Self::FileSystem {
                operation,
                path,
                reason: error.to_string(),
            }
        }
    }
}

/// An error paired with optional details and a suggestion for the user.
#[derive(Debug)]
pub struct ErrorContext {
    pub error: UpdateError,
    pub suggestion: Option<String>,
    pub details: Option<String>,
}

impl ErrorContext {
    #[must_use]
    pub const fn new(error: UpdateError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with colored labels.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] suitable for the terminal.
///
/// Typed [`UpdateError`]s are found anywhere in the context chain. When the
/// orchestrator wrapped the error with the name of the failing step, that
/// message becomes the details line.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let outer = error.to_string();

    if let Some(update_error) = error.downcast_ref::<UpdateError>() {
        let ctx = create_error_context(update_error.clone());
        if outer != update_error.to_string() {
            return ctx.with_details(outer);
        }
        return ctx;
    }

    if let Some(request_error) = error.downcast_ref::<reqwest::Error>() {
        let url = request_error.url().map_or_else(|| "unknown".to_string(), ToString::to_string);
        return ErrorContext::new(UpdateError::Network {
            url,
            reason: request_error.to_string(),
        })
        .with_suggestion("Check your internet connection and try again");
    }

    // Generic error - include the full chain for diagnostics
    let mut message = outer;
    let chain: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(UpdateError::Other {
        message,
    })
}

fn create_error_context(error: UpdateError) -> ErrorContext {
    let suggestion = match &error {
        UpdateError::Network { .. } => Some(
            "Check your internet connection and re-run; an already downloaded archive is reused",
        ),
        UpdateError::NotFound { .. } => Some(
            "The release page layout may have changed. Pin a release with --version go1.X.Y",
        ),
        UpdateError::Parse { .. } => {
            Some("Versions look like go1.23.2; pin one explicitly with --version")
        }
        UpdateError::PermissionDenied { .. } => {
            Some("Re-run with sudo; the install directory is usually owned by root")
        }
        UpdateError::FileSystem { .. } => {
            Some("Check free disk space and permissions, then re-run")
        }
        UpdateError::Other { .. } => None,
    };

    let ctx = ErrorContext::new(error);
    match suggestion {
        Some(suggestion) => ctx.with_suggestion(suggestion),
        None => ctx,
    }
}

//! Error handling for tmplmerge
//!
//! This module provides the error taxonomy and user-facing error reporting for the
//! merge tools. The error system follows two principles:
//! 1. **Strongly-typed errors** so callers can tell a fatal input problem from a
//!    skippable one
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Error Categories
//!
//! - **Missing required input**: [`TmplmergeError::InputNotFound`] is fatal
//! - **Malformed structured input**: [`TmplmergeError::JsonParseError`] and
//!   [`TmplmergeError::InvalidDocument`] stop a config or catalog merge
//! - **Corrupt state**: [`TmplmergeError::InvalidState`] is reported by the state
//!   migrator, whose caller treats it as "leave the file alone"
//! - **Configuration**: [`TmplmergeError::ConfigParseError`] for a bad TOML file
//!
//! Missing optional inputs (an existing markdown document, an overlay file) are not
//! errors at all and never reach this module.
//!
//! # Examples
//!
//! ```rust,no_run
//! use tmplmerge::core::{TmplmergeError, user_friendly_error};
//!
//! let error = TmplmergeError::InputNotFound {
//!     path: "base/CLAUDE.md".to_string(),
//! };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // Shows colored error with suggestions
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for tmplmerge operations.
///
/// # Examples
///
/// ```rust,no_run
/// use tmplmerge::core::TmplmergeError;
///
/// fn handle_error(error: TmplmergeError) {
///     match error {
///         TmplmergeError::InputNotFound { path } => {
///             eprintln!("Missing input: {}", path);
///         }
///         TmplmergeError::JsonParseError { path, .. } => {
///             eprintln!("Fix the JSON in {}", path);
///         }
///         _ => eprintln!("Unexpected error: {}", error),
///     }
/// }
/// ```
#[derive(Error, Debug)]
pub enum TmplmergeError {
    /// A required input file does not exist.
    #[error("Required input not found: {path}")]
    InputNotFound {
        /// Path that was expected to exist
        path: String,
    },

    /// A JSON input exists but could not be parsed.
    #[error("Invalid JSON in {path}: {reason}")]
    JsonParseError {
        /// File containing the invalid JSON
        path: String,
        /// Parser message
        reason: String,
    },

    /// A JSON input parsed but does not have the expected shape.
    #[error("Unexpected document structure in {path}: {reason}")]
    InvalidDocument {
        /// File (or label) of the offending document
        path: String,
        /// What was expected
        reason: String,
    },

    /// A state record cannot be migrated safely.
    #[error("Invalid state record: {reason}")]
    InvalidState {
        /// Why the record was rejected
        reason: String,
    },

    /// The TOML configuration file could not be parsed.
    #[error("Invalid configuration file {path}: {reason}")]
    ConfigParseError {
        /// Configuration file path
        path: String,
        /// Parser message
        reason: String,
    },

    /// Anything else.
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
    },
}

/// Error context wrapper that provides user-friendly error information.
///
/// When displayed, errors show:
/// 1. **Error**: The main error message in red
/// 2. **Details**: Additional context about the error in yellow (optional)
/// 3. **Suggestion**: Actionable steps to resolve the issue in green (optional)
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: TmplmergeError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: TmplmergeError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining the error.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with colors.
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

/// Convert any error into an [`ErrorContext`] with suggestions for the CLI.
///
/// Known [`TmplmergeError`] variants anywhere in the error chain get tailored
/// suggestions; everything else is wrapped as [`TmplmergeError::Other`] with the
/// full context chain in the details.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    for cause in error.chain() {
        if let Some(err) = cause.downcast_ref::<TmplmergeError>() {
            return create_error_context(err, &error);
        }
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(TmplmergeError::Other {
                    message: format!("{error:#}"),
                })
                .with_suggestion("Check file ownership and permissions of the input and output paths");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(TmplmergeError::Other {
                    message: format!("{error:#}"),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct");
            }
            _ => {}
        }
    }

    ErrorContext::new(TmplmergeError::Other {
        message: error.to_string(),
    })
    .with_details(chain_details(&error))
}

fn create_error_context(err: &TmplmergeError, whole: &anyhow::Error) -> ErrorContext {
    let (error, suggestion) = match err {
        TmplmergeError::InputNotFound { path } => (
            TmplmergeError::InputNotFound { path: path.clone() },
            "Check the path; required inputs must exist before merging",
        ),
        TmplmergeError::JsonParseError { path, reason } => (
            TmplmergeError::JsonParseError {
                path: path.clone(),
                reason: reason.clone(),
            },
            "Fix the JSON syntax in the file; no output was written",
        ),
        TmplmergeError::InvalidDocument { path, reason } => (
            TmplmergeError::InvalidDocument {
                path: path.clone(),
                reason: reason.clone(),
            },
            "Config documents must be JSON objects; check the file against the expected layout",
        ),
        TmplmergeError::InvalidState { reason } => (
            TmplmergeError::InvalidState { reason: reason.clone() },
            "Inspect the state file by hand; it was left untouched",
        ),
        TmplmergeError::ConfigParseError { path, reason } => (
            TmplmergeError::ConfigParseError {
                path: path.clone(),
                reason: reason.clone(),
            },
            "Check the TOML syntax of the configuration file passed with --config",
        ),
        TmplmergeError::Other { message } => (
            TmplmergeError::Other { message: message.clone() },
            "Re-run with --verbose for more detail",
        ),
    };

    let ctx = ErrorContext::new(error).with_suggestion(suggestion);
    if whole.chain().count() > 1 {
        ctx.with_details(chain_details(whole))
    } else {
        ctx
    }
}

fn chain_details(error: &anyhow::Error) -> String {
    error.chain().map(ToString::to_string).collect::<Vec<_>>().join(": ")
}

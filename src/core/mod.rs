//! Core types shared by every merge tool.
//!
//! At the moment this is the error taxonomy and the user-facing error display
//! used by `main` before exiting with a non-zero status.

pub mod error;

pub use error::{ErrorContext, TmplmergeError, user_friendly_error};

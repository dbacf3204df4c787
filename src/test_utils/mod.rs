//! Test utilities for tmplmerge
//!
//! Fixture builders for the documents each merge tool reads, and a one-time
//! tracing setup so `RUST_LOG=debug cargo test` shows the merge decisions.
//!
//! # Example
//!
//! ```rust,no_run
//! use tmplmerge::test_utils::{MarkdownFixture, init_test_logging};
//!
//! init_test_logging(None);
//! let dir = tempfile::TempDir::new().unwrap();
//! let base = MarkdownFixture::base_template().write_to(dir.path()).unwrap();
//! assert!(base.exists());
//! ```

pub mod fixtures;

pub use fixtures::{JsonFixture, MarkdownFixture};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has any effect. Uses `level` if given, otherwise
/// `RUST_LOG`; with neither, logging stays off.
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
            .with_ansi(true)
            .try_init();
    });
}

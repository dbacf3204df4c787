//! tmplmerge - merge template-managed files without losing local edits
//!
//! A project that adopts a shared template receives guideline documents,
//! MCP server configs, settings files and component catalogs from it. When the
//! template is updated those files have to be refreshed while keeping
//! whatever the project added itself. This crate implements the merge rules
//! for each kind of file and a small CLI around them.
//!
//! # Modules
//!
//! - [`markdown`] - section-based merge of guideline documents (`CLAUDE.md`)
//! - [`merge`] - generic deep merge of JSON settings documents
//! - [`mcp`] - MCP server list merge with collision reporting
//! - [`state`] - schema migration of the activation state file
//! - [`catalog`] - component catalog merge
//! - [`config`] - optional TOML configuration (markers, managed headings)
//! - [`core`] - error types and user-facing error rendering
//! - [`utils`] - atomic writes and JSON file helpers
//! - [`cli`] - the `tmplmerge` command line
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use tmplmerge::merge::merge_settings;
//!
//! let base = json!({"permissions": {"allow": ["Read"]}});
//! let overlay = json!({"permissions": {"allow": ["Bash(git:*)"]}});
//!
//! let merged = merge_settings(Some(base), [&overlay]);
//! assert_eq!(merged, json!({"permissions": {"allow": ["Read", "Bash(git:*)"]}}));
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod markdown;
pub mod mcp;
pub mod merge;
pub mod state;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

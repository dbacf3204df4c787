//! Integration test suite for tmplmerge
//!
//! End-to-end tests that run the compiled binary against files in a temporary
//! project directory.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **markdown**: guideline document merge, copy path, re-merge
//! - **config_merge**: MCP and settings merges, base documents, warnings
//! - **migrate_state**: state file migration and its silent skip paths
//! - **catalog**: component catalog merge
//! - **error_scenarios**: fatal inputs and error rendering

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

mod catalog;
mod config_merge;
mod error_scenarios;
mod markdown;
mod migrate_state;

//! Markdown section merging for template-managed guideline documents.
//!
//! A guidelines document such as `CLAUDE.md` is partly owned by a template and
//! partly by the project. This module splits documents into heading-delimited
//! [`Section`]s, decides which existing sections the template supersedes, and
//! writes a combined document with the template framed by sentinel markers and
//! the user's own sections collected under a `## Project-Specific` heading.
//!
//! # Example
//!
//! ```
//! use tmplmerge::config::MarkdownConfig;
//! use tmplmerge::markdown::merge_markdown;
//!
//! let base = "# Project Guidelines\n\n## Security\nNo secrets in git.\n";
//! let existing = "# Project Guidelines\n\n## Security\nold\n\n## Deployment\nmake ship\n";
//!
//! let merged = merge_markdown(base, Some(existing), &MarkdownConfig::default());
//! assert!(merged.contains("No secrets in git."));
//! assert!(!merged.contains("old"));
//! assert!(merged.contains("## Project-Specific\n\n### Deployment\nmake ship\n"));
//! ```

mod merge;
mod sections;

pub use merge::{MarkdownMerge, merge_markdown, merge_markdown_with_report, strip_managed_block};
pub use sections::{Section, parse_heading, split_sections};

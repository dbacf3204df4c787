//! Configuration for tmplmerge.
//!
//! The merge tools work without any configuration file. When one is supplied
//! with `--config` (or `TMPLMERGE_CONFIG`) it can override the markdown merge
//! vocabulary: the sentinel markers, the template title, the umbrella heading for
//! custom sections and the set of template-managed headings.
//!
//! ```toml
//! [markdown]
//! marker_start = "<!-- claude-templates: managed-start -->"
//! marker_end = "<!-- claude-templates: managed-end -->"
//! title = "Project Guidelines"
//! custom_heading = "Project-Specific"
//! managed_headers = ["Quality Standards", "Git Workflow", "Security"]
//! ```
//!
//! Every key is optional. Unknown keys are rejected so typos don't silently fall
//! back to defaults.

use crate::constants::{
    CUSTOM_HEADING, DEFAULT_MANAGED_HEADERS, MARKER_END, MARKER_START, TEMPLATE_TITLE,
};
use crate::core::TmplmergeError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MergeConfig {
    /// Markdown section merge settings.
    pub markdown: MarkdownConfig,
}

/// Vocabulary of the markdown section merge.
///
/// Passed explicitly to [`crate::markdown::merge_markdown`] so callers and tests
/// can use alternate header sets without any process-wide state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkdownConfig {
    /// Line opening the template-managed block.
    pub marker_start: String,

    /// Line closing the template-managed block.
    pub marker_end: String,

    /// Title heading of the template. Existing sections with this heading are dropped.
    pub title: String,

    /// Heading that groups retained custom sections in the output.
    pub custom_heading: String,

    /// Headings owned by the template.
    pub managed_headers: BTreeSet<String>,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            marker_start: MARKER_START.to_string(),
            marker_end: MARKER_END.to_string(),
            title: TEMPLATE_TITLE.to_string(),
            custom_heading: CUSTOM_HEADING.to_string(),
            managed_headers: DEFAULT_MANAGED_HEADERS.iter().map(|h| (*h).to_string()).collect(),
        }
    }
}

impl MarkdownConfig {
    /// Returns true if `header` names a template-managed section.
    #[must_use]
    pub fn is_managed(&self, header: &str) -> bool {
        self.managed_headers.contains(header)
    }

    /// Replace the managed header set.
    #[must_use]
    pub fn with_managed_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.managed_headers = headers.into_iter().map(Into::into).collect();
        self
    }

    fn validate(&self, path: &Path) -> Result<()> {
        let problem = if self.marker_start.trim().is_empty() || self.marker_end.trim().is_empty() {
            Some("markdown markers must not be empty")
        } else if self.marker_start == self.marker_end {
            Some("markdown.marker_start and markdown.marker_end must differ")
        } else if self.custom_heading.trim().is_empty() {
            Some("markdown.custom_heading must not be empty")
        } else {
            None
        };

        match problem {
            Some(reason) => Err(TmplmergeError::ConfigParseError {
                path: path.display().to_string(),
                reason: reason.to_string(),
            }
            .into()),
            None => Ok(()),
        }
    }
}

impl MergeConfig {
    /// Load configuration from an optional path.
    ///
    /// `None` yields the defaults. A path that is given must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file does not exist or cannot be read
    /// - The file contains invalid TOML or unknown keys
    /// - The markers are empty or identical
    pub fn load_with_optional(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// See [`MergeConfig::load_with_optional`].
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(TmplmergeError::InputNotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config: Self =
            toml::from_str(&content).map_err(|e| TmplmergeError::ConfigParseError {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        config.markdown.validate(path)?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}

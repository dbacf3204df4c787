//! Merge a template guidelines document into a project's copy.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::CliConfig;
use crate::config::MergeConfig;
use crate::core::TmplmergeError;
use crate::markdown::merge_markdown_with_report;
use crate::utils::fs::{read_text_file, write_text_file};

/// Merge a base template with an existing document.
///
/// Sections of the existing document that the template owns are replaced;
/// everything else is kept under the custom heading. Without an existing
/// document the base is copied as-is.
///
/// # Examples
///
/// ```bash
/// tmplmerge markdown --base templates/CLAUDE.md --existing CLAUDE.md --output CLAUDE.md
/// ```
#[derive(Args, Debug)]
pub struct MarkdownCommand {
    /// Base template document (required to exist).
    #[arg(long)]
    base: PathBuf,

    /// Existing project document. A missing file is treated as absent.
    #[arg(long)]
    existing: Option<PathBuf>,

    /// Where to write the merged document. Parent directories are created.
    #[arg(short, long)]
    output: PathBuf,
}

impl MarkdownCommand {
    /// Run the merge and write the output file.
    ///
    /// # Errors
    ///
    /// Fails if the base document is missing, the configuration file is
    /// invalid, or the output cannot be written.
    pub fn execute(self, config: &CliConfig) -> Result<()> {
        let settings = MergeConfig::load_with_optional(config.config_path.as_deref())?;

        if !self.base.is_file() {
            return Err(TmplmergeError::InputNotFound {
                path: self.base.display().to_string(),
            }
            .into());
        }
        let base = read_text_file(&self.base)?;

        let existing = match &self.existing {
            Some(path) if path.is_file() => Some(read_text_file(path)?),
            Some(path) => {
                tracing::debug!("Existing document {} not found, copying base", path.display());
                None
            }
            None => None,
        };
        let content = match existing.as_deref() {
            Some(existing) => {
                let merge = merge_markdown_with_report(&base, existing, &settings.markdown);
                tracing::debug!(
                    "Replaced sections: {:?}; preserved sections: {:?}",
                    merge.replaced,
                    merge.preserved
                );
                if merge.stripped_previous {
                    tracing::debug!("Stripped previous managed block");
                }
                merge.content
            }
            None => base,
        };

        write_text_file(&self.output, &content)?;

        if !config.quiet {
            let has_content = existing.as_deref().is_some_and(|content| !content.is_empty());
            match (&self.existing, has_content) {
                (Some(existing_path), true) => println!(
                    "Merged: {} + {} -> {}",
                    self.base.display(),
                    existing_path.display(),
                    self.output.display()
                ),
                _ => println!("Copied: {} -> {}", self.base.display(), self.output.display()),
            }
        }

        Ok(())
    }
}

//! Merge component catalogs.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use super::CliConfig;
use crate::catalog::merge_catalog_files;

/// Merge a donor catalog into a target catalog, rewriting the target.
///
/// The target keeps its agents and MCP servers, gains donor agents it does not
/// list yet, and takes the donor's skills and plugins.
///
/// # Examples
///
/// ```bash
/// tmplmerge catalog --target external-catalog.json --donor ../claude-templates/external-catalog.json
/// ```
#[derive(Args, Debug)]
pub struct CatalogCommand {
    /// Catalog to update in place.
    #[arg(long)]
    target: PathBuf,

    /// Catalog to take components from.
    #[arg(long)]
    donor: PathBuf,
}

impl CatalogCommand {
    /// Run the merge.
    ///
    /// # Errors
    ///
    /// Fails if either catalog is missing or malformed, or the target cannot be
    /// written.
    pub fn execute(self, config: &CliConfig) -> Result<()> {
        let result = merge_catalog_files(&self.target, &self.donor).with_context(|| {
            format!(
                "Failed to merge catalog {} into {}",
                self.donor.display(),
                self.target.display()
            )
        })?;

        if !config.quiet {
            println!(
                "Merged {} agent(s) from {} into {}",
                result.agents_added,
                self.donor.display(),
                self.target.display()
            );
        }

        Ok(())
    }
}

//! Deep-merge JSON config files.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use super::CliConfig;
use crate::merge::{ConfigKind, merge_config_files};
use crate::utils::fs::write_json_pretty;

/// Merge an ordered list of config files into one output document.
///
/// Later files win. With `--base`, an existing document (usually the current
/// output) is used as the starting point so local additions survive a
/// re-merge. Missing base and overlay files are skipped.
///
/// # Examples
///
/// ```bash
/// tmplmerge config --type mcp -o .mcp.json base/mcp.json overlays/web/mcp.json
/// tmplmerge config --type settings -b .claude/settings.json -o .claude/settings.json base/settings.json
/// ```
#[derive(Args, Debug)]
pub struct ConfigCommand {
    /// Merge strategy: `mcp` merges server lists by name, `settings` deep-merges.
    #[arg(long = "type", value_enum)]
    kind: ConfigKind,

    /// Existing config to start from.
    #[arg(short, long)]
    base: Option<PathBuf>,

    /// Where to write the merged JSON. Parent directories are created.
    #[arg(short, long)]
    output: PathBuf,

    /// Config files to merge, in order.
    #[arg(required = true, num_args = 1..)]
    files: Vec<PathBuf>,
}

impl ConfigCommand {
    /// Run the merge and write the output file.
    ///
    /// # Errors
    ///
    /// Fails if any existing input is not a JSON object (nothing is written),
    /// or if the output cannot be written.
    pub fn execute(self, config: &CliConfig) -> Result<()> {
        let merged = merge_config_files(self.kind, &self.files, self.base.as_deref())
            .with_context(|| format!("Failed to merge {} configs", self.kind))?;

        for collision in &merged.collisions {
            tracing::warn!("{collision}");
            eprintln!("{} {collision}", "Warning:".yellow());
        }

        write_json_pretty(&self.output, &merged.config)?;

        if !config.quiet {
            let mut summary = format!(
                "Merged {} config(s) -> {}",
                merged.applied,
                self.output.display()
            );
            if !merged.skipped.is_empty() {
                summary.push_str(&format!(" ({} missing skipped)", merged.skipped.len()));
            }
            println!("{summary}");
        }

        Ok(())
    }
}

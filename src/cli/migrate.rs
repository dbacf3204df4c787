//! Migrate the template activation state file.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::CliConfig;
use crate::state::{MigrateOutcome, migrate_file};

/// Bring a state file up to the current schema, in place.
///
/// Runs on every template invocation, so it is silent and succeeds even when
/// the file is missing or corrupt. The file is rewritten only when something
/// changed.
///
/// # Examples
///
/// ```bash
/// tmplmerge migrate-state .claude/.activated-overlays.json --template-version 1.2.0
/// ```
#[derive(Args, Debug)]
pub struct MigrateStateCommand {
    /// Path to the state file.
    state_file: PathBuf,

    /// Template version to record. Empty means not supplied.
    #[arg(long)]
    template_version: Option<String>,
}

impl MigrateStateCommand {
    /// Run the migration.
    ///
    /// # Errors
    ///
    /// Only a failure to write the migrated file is an error.
    pub fn execute(self, _config: &CliConfig) -> Result<()> {
        let outcome = migrate_file(&self.state_file, self.template_version.as_deref())?;

        match outcome {
            MigrateOutcome::Missing | MigrateOutcome::Unchanged => {}
            MigrateOutcome::Unreadable => tracing::info!(
                "State file {} could not be read; left untouched",
                self.state_file.display()
            ),
            MigrateOutcome::Migrated => {
                tracing::info!("Migrated {}", self.state_file.display());
            }
        }

        Ok(())
    }
}

//! Command-line interface for tmplmerge.
//!
//! Each subcommand wraps one merge tool and lives in its own module:
//!
//! - `markdown` - merge a template guidelines document into a project copy
//! - `config` - deep-merge MCP or settings JSON documents
//! - `migrate-state` - bring the activation state file up to the current schema
//! - `catalog` - pull agents, skills and plugins from one catalog into another
//!
//! # Global Options
//!
//! - `--verbose` / `-v`: debug logging on stderr
//! - `--quiet` / `-q`: no summaries, errors only
//! - `--config` / `-c`: TOML configuration file (also `TMPLMERGE_CONFIG`)
//!
//! # Examples
//!
//! ```bash
//! tmplmerge markdown --base templates/CLAUDE.md --existing CLAUDE.md -o CLAUDE.md
//! tmplmerge config --type mcp -o .mcp.json base/mcp.json overlays/web-dev/mcp.json
//! tmplmerge config --type settings -b .claude/settings.json -o .claude/settings.json base/settings.json
//! tmplmerge migrate-state .claude/.activated-overlays.json --template-version 1.2.0
//! tmplmerge catalog --target external-catalog.json --donor ../claude/external-catalog.json
//! ```

mod catalog;
mod config;
mod markdown;
mod migrate;


use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Runtime configuration for command execution.
///
/// Built from the parsed global flags by [`Cli::build_config`], or constructed
/// directly by tests that want to run a command without going through argument
/// parsing.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter used when `RUST_LOG` is not set. `None` means `warn`.
    pub log_level: Option<String>,

    /// Suppress the one-line summaries printed on success.
    pub quiet: bool,

    /// Path to the TOML configuration file, if one was given.
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the global tracing subscriber, writing to stderr.
    ///
    /// `RUST_LOG` takes precedence over the configured level. Calling this more
    /// than once is harmless; later calls are ignored.
    pub fn init_logging(&self) {
        let level = self.log_level.as_deref().unwrap_or("warn");
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Merge template-managed files into a project without losing local edits.
#[derive(Parser, Debug)]
#[command(
    name = "tmplmerge",
    about = "Merge template-managed markdown, config and state files",
    version,
    long_about = "tmplmerge applies template updates to a project's guideline documents, \
                  MCP and settings configs, activation state and component catalogs while \
                  preserving the project's own customizations."
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging on stderr.
    ///
    /// Equivalent to `RUST_LOG=debug`. Mutually exclusive with `--quiet`.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress summaries; only errors are printed.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to a TOML configuration file.
    ///
    /// Only the `[markdown]` table is read today: sentinel markers, title,
    /// custom heading and the managed header list.
    #[arg(short, long, global = true, env = "TMPLMERGE_CONFIG")]
    config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Merge a base template markdown document with an existing project copy.
    ///
    /// See [`markdown::MarkdownCommand`].
    Markdown(markdown::MarkdownCommand),

    /// Deep-merge JSON config files (MCP server lists or settings).
    ///
    /// See [`config::ConfigCommand`].
    Config(config::ConfigCommand),

    /// Migrate a template activation state file to the current schema.
    ///
    /// See [`migrate::MigrateStateCommand`].
    MigrateState(migrate::MigrateStateCommand),

    /// Merge a donor component catalog into a target catalog.
    ///
    /// See [`catalog::CatalogCommand`].
    Catalog(catalog::CatalogCommand),
}

impl Cli {
    /// Execute the CLI with a configuration built from the parsed flags.
    ///
    /// # Errors
    ///
    /// Returns the subcommand's error, to be rendered by
    /// [`crate::core::user_friendly_error`].
    pub fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config)
    }

    /// Build a [`CliConfig`] from the parsed global flags.
    ///
    /// ```rust,ignore
    /// let cli = Cli::parse_from(["tmplmerge", "--verbose", "migrate-state", "state.json"]);
    /// assert_eq!(cli.build_config().log_level.as_deref(), Some("debug"));
    /// ```
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        };

        CliConfig {
            log_level: Some(log_level.to_string()),
            quiet: self.quiet,
            config_path: self.config.clone(),
        }
    }

    /// Execute the CLI with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns the subcommand's error.
    pub fn execute_with_config(self, config: CliConfig) -> Result<()> {
        match self.command {
            Commands::Markdown(cmd) => cmd.execute(&config),
            Commands::Config(cmd) => cmd.execute(&config),
            Commands::MigrateState(cmd) => cmd.execute(&config),
            Commands::Catalog(cmd) => cmd.execute(&config),
        }
    }
}

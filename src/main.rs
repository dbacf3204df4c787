//! tmplmerge CLI entry point
//!
//! Parses arguments, installs logging, runs the subcommand and renders any
//! error with suggestions before exiting with status 1.

use anyhow::Result;
use clap::Parser;
use tmplmerge::cli;
use tmplmerge::core::user_friendly_error;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let config = cli.build_config();
    config.init_logging();

    match cli.execute_with_config(config) {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}

//! Command dispatch for the ausflug CLI

use std::time::Instant;

use ausflug_core::error::Result;

use crate::cli::{Cli, Commands};

use super::{categories, columns, fav, list, locate};

/// Route a parsed CLI invocation to its command implementation.
pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let result = match &cli.command {
        Commands::List(args) => list::execute(cli, args),
        Commands::Columns => columns::execute(cli),
        Commands::Categories => categories::execute(cli),
        Commands::Fav { command } => fav::execute(cli, command),
        Commands::Locate { place } => locate::execute(cli, place),
    };

    tracing::debug!(elapsed = ?start.elapsed(), "command_complete");

    result
}

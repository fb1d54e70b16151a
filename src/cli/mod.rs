pub mod args;
pub mod commands;
pub mod output;
mod prompts;
pub mod script;
pub mod session;

use clap::Parser;

use crate::errors::CliError;
use args::{Cli, Commands};
use session::Session;

/// Parses the process arguments and runs the selected command.
pub fn run_cli() -> Result<(), CliError> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Validate(args) => commands::validate(args),
        Commands::Start(args) => commands::start(&Session::open(cli.home)?, args),
        Commands::Drafts { action } => commands::drafts(&Session::open(cli.home)?, action),
        Commands::Config { action } => commands::config(&Session::open(cli.home)?, action),
    }
}

//! Subcommand implementations and dispatch.

pub mod list;
pub mod run;
pub mod status;

use clap::CommandFactory;

use super::args::{Cli, Commands, RunArgs};
use crate::error::Result;
use crate::ui::{Output, OutputMode};

/// Dispatch the parsed CLI to a command and return the exit code.
pub fn dispatch(cli: &Cli) -> Result<i32> {
    let mode = if cli.quiet {
        OutputMode::Quiet
    } else if cli.verbose {
        OutputMode::Verbose
    } else {
        OutputMode::Normal
    };
    let output = Output::new(mode);

    match &cli.command {
        None => run::execute(&RunArgs::default(), &output),
        Some(Commands::Run(args)) => run::execute(args, &output),
        Some(Commands::Status(args)) => status::execute(args, &output),
        Some(Commands::List(args)) => list::execute(args, &output),
        Some(Commands::Completions(args)) => {
            let mut cmd = Cli::command();
            clap_complete::generate(args.shell, &mut cmd, "rigup", &mut std::io::stdout());
            Ok(0)
        }
    }
}

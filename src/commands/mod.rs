mod analyze;
mod utils;
mod vectorize;

use crate::cli::{Cli, Commands, GlobalOptions};
use vectrace::VectorizeResult;

/// The main function to run the command based on CLI input.
pub fn run(cli: Cli) -> VectorizeResult<()> {
    let Cli { global, command } = cli;
    dispatch(&global, command)
}

/// Dispatch the command to the appropriate handler.
fn dispatch(_global: &GlobalOptions, command: Commands) -> VectorizeResult<()> {
    match command {
        Commands::Vectorize(cmd) => vectorize::run(cmd),
        Commands::Analyze(cmd) => analyze::run(cmd),
    }
}

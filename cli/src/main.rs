mod commands;
mod terminal;

use std::process::ExitCode;

use commands::{CommandLine, Commands, generate, targets};
use terminal::{logging, print};
use topogen_common::error::{EXIT_FAILURE, TopologyError};
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    let commands = CommandLine::parse_args();
    let q_level = commands.quiet;

    logging::init_logging(commands.verbose, q_level);
    print::banner(q_level);

    let result = match commands.command {
        Commands::Generate(args) => {
            print::header("resolving targets", q_level);
            generate::generate(args, q_level).await
        }
        Commands::Targets(args) => targets::targets(args, q_level).await,
    };

    match result {
        Ok(()) => {
            if q_level == 0 {
                print::end_of_program();
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e:#}");
            ExitCode::from(exit_code(&e))
        }
    }
}

fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<TopologyError>()
        .map(TopologyError::exit_code)
        .unwrap_or(EXIT_FAILURE)
}

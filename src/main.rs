mod cli;
mod commands;
mod formatting;
mod logging;
mod settings;

use std::process::ExitCode;

use cli::Commands;
use commands::{run_inspect, run_session};

#[tokio::main]
async fn main() -> ExitCode {
    run().await
}

async fn run() -> ExitCode {
    let raw_args: Vec<String> = std::env::args().collect();
    let args = cli::parse();
    logging::init_logging(args.verbose);

    match args.command {
        Commands::Inspect {
            input,
            target,
            index,
            input_type,
            max_matches,
            console_max_matches,
            format,
            output,
            fail_on_empty,
        } => {
            run_inspect(
                &raw_args,
                args.config,
                args.verbose,
                input,
                target,
                index,
                input_type,
                max_matches,
                console_max_matches,
                format,
                output,
                fail_on_empty,
            )
            .await
        }
        Commands::Session {
            input,
            input_type,
            events,
            format,
            output,
        } => {
            run_session(
                args.config,
                args.verbose,
                input,
                input_type,
                events,
                format,
                output,
            )
            .await
        }
    }
}

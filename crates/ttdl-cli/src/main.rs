use std::process::ExitCode;

use ttdl_core::logging;

mod cli;

use crate::cli::CliCommand;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging as early as possible.
    logging::init_logging();

    // Parse CLI and dispatch.
    match CliCommand::run_from_args().await {
        Ok(status) if status.is_error() => ExitCode::from(1),
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ttdl error: {:#}", err);
            ExitCode::from(2)
        }
    }
}

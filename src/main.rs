//! ai-engine: crew configuration service.
//!
//! This is the main entry point for the `ai-engine` CLI. It parses arguments,
//! dispatches to the appropriate command handler, and maps errors to exit
//! codes.

use ai_engine::cli::Cli;
use ai_engine::commands;
use ai_engine::error::EngineError;
use ai_engine::exit_codes;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    match commands::dispatch(cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            eprintln!("Error: {:#}", err);

            let code = err
                .downcast_ref::<EngineError>()
                .map(EngineError::exit_code)
                .unwrap_or(exit_codes::INTERNAL_FAILURE);
            ExitCode::from(code as u8)
        }
    }
}

//! Binary entrypoint for the `registry-idgen` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    // A missing .env file is fine; variables may come from the environment.
    let _ = dotenvy::dotenv();

    // Recording is handled in commands::dispatch via REGISTRY_IDGEN_RECORD=<dir>.
    match registry_idgen::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

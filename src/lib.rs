//! Registry modifier that assigns generated identifiers to new governance
//! objects.
//!
//! When the host repository creates a service or application version, the
//! [`modifier::IdentifierModifier`] stores a fresh UUID in its
//! `gep63_consumerIdentifier` property; for a service level agreement it
//! fills `gep63_contextIdentifier`. All repository access goes through the
//! [`ports::RepositoryClient`] trait so the same logic runs against any
//! host binding, the bundled file store, or recorded cassettes.

pub mod adapters;
pub mod cassette;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod model;
pub mod modifier;
pub mod ports;

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        // --help and --version
        Err(err) if !err.use_stderr() => {
            let _ = err.print();
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    };
    commands::dispatch(&cli)
}

/// Install the stderr `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over `default_filter`. Later calls are
/// ignored once a subscriber is installed.
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::run;

    #[test]
    fn run_executes_classify() {
        let result = run(["registry-idgen", "classify", "urn:other"]);
        assert!(result.is_ok());
    }

    #[test]
    fn run_errors_on_unknown_subcommand() {
        let result = run(["registry-idgen", "unknown"]);
        assert!(result.is_err());
    }

    #[test]
    fn init_tracing_is_idempotent() {
        super::init_tracing("debug");
        super::init_tracing("not a valid filter ===");
    }
}

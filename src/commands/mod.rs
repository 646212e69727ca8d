//! Command dispatch and handlers.

pub mod classify;
pub mod create;
pub mod generate;
pub mod show;

use std::env;
use std::path::{Path, PathBuf};

use crate::cassette::session::RecordingSession;
use crate::cli::{Cli, Command};
use crate::config::ModifierConfig;
use crate::context::ServiceContext;

/// Environment variable naming a directory to record port traffic into.
pub const RECORD_ENV: &str = "REGISTRY_IDGEN_RECORD";

/// Dispatch a parsed command line to its handler.
///
/// When `REGISTRY_IDGEN_RECORD` is set to a directory path, the repository
/// and ID generator traffic of `create` is recorded to per-port cassette
/// files in that directory.
///
/// # Errors
///
/// Returns an error string if configuration cannot be loaded or the
/// selected command handler fails.
pub fn dispatch(cli: &Cli) -> Result<(), String> {
    let config = ModifierConfig::load(cli.config.as_deref()).map_err(|e| e.to_string())?;
    crate::init_tracing(&config.log_filter);

    match &cli.command {
        Command::Classify { primary_type } => classify::run(primary_type),
        Command::Types => classify::list_types(),
        Command::Generate { count } => generate::run(*count),
        Command::Create { store, uri, primary_type, kind, name } => {
            let store = resolve_store(store.as_deref(), &config)?;
            let request = create::CreateRequest {
                uri: uri.clone(),
                primary_type: primary_type.clone(),
                kind: *kind,
                name: name.clone(),
            };
            match env::var(RECORD_ENV) {
                Ok(dir) if !dir.is_empty() => {
                    record_create(PathBuf::from(dir), &store, &request, &config)
                }
                _ => create::run(&ServiceContext::live(&store), &store, &request, &config),
            }
        }
        Command::Show { store, uri } => {
            show::run(&resolve_store(store.as_deref(), &config)?, uri)
        }
    }
}

/// Pick the `--store` argument, falling back to the configured store.
fn resolve_store(arg: Option<&Path>, config: &ModifierConfig) -> Result<PathBuf, String> {
    arg.map(Path::to_path_buf)
        .or_else(|| config.store.clone())
        .ok_or_else(|| "No store given: pass --store or set REGISTRY_IDGEN_STORE".to_string())
}

/// Run `create` against a recording context and write the cassettes.
fn record_create(
    dir: PathBuf,
    store: &Path,
    request: &create::CreateRequest,
    config: &ModifierConfig,
) -> Result<(), String> {
    let session = RecordingSession::new(dir)?;
    let ctx = ServiceContext::recording(store, &session);
    let result = create::run(&ctx, store, request, config);

    // Drop context first to release Arc references
    drop(ctx);
    let output_dir = session.finish()?;
    eprintln!("Recording saved to: {}", output_dir.display());

    result
}

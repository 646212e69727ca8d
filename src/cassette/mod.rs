//! Cassette format for recording and replaying port interactions.
//!
//! A recording session writes one cassette per port
//! (`repository.cassette.yaml`, `id_gen.cassette.yaml`) into a directory;
//! replaying reads them back so a creation callback can be re-run against
//! exactly the collaborator responses that were captured.

pub mod format;
pub mod recorder;
pub mod replayer;
pub mod session;

/// File name of a port's cassette inside a session directory.
#[must_use]
pub fn cassette_file_name(port: &str) -> String {
    format!("{port}.cassette.yaml")
}

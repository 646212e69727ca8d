//! Replaying adapters that replay recorded interactions.

pub mod id_gen;
pub mod repository;

pub use id_gen::ReplayingIdGenerator;
pub use repository::ReplayingRepository;

use std::sync::{Mutex, PoisonError};

use crate::cassette::replayer::CassetteReplayer;

/// Take the output of the next recorded `port::method` interaction.
///
/// # Panics
///
/// Panics if the cassette holds no further interaction for the pair.
pub(crate) fn next_output(
    replayer: &Mutex<CassetteReplayer>,
    port: &str,
    method: &str,
) -> serde_json::Value {
    let mut replayer = replayer.lock().unwrap_or_else(PoisonError::into_inner);
    replayer.next_interaction(port, method).output
}

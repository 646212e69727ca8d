//! Replaying adapter for the `RepositoryClient` port.

use std::sync::Mutex;

use serde::de::DeserializeOwned;

use super::next_output;
use crate::cassette::replayer::CassetteReplayer;
use crate::model::ManagedObject;
use crate::ports::{RepositoryClient, RepositoryError};

/// Replays recorded repository results from a cassette.
///
/// Inputs are not compared against the recording; results are served in
/// the order they were captured.
pub struct ReplayingRepository {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingRepository {
    /// Creates a new replaying repository from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

/// Decodes a recorded `{"Ok": ..}` / `{"Err": ..}` result.
fn decode<T: DeserializeOwned>(
    output: serde_json::Value,
    context: &str,
) -> Result<T, RepositoryError> {
    serde_json::from_value::<Result<T, RepositoryError>>(output).unwrap_or_else(|e| {
        Err(RepositoryError::Storage { reason: format!("{context}: unreadable recording: {e}") })
    })
}

impl RepositoryClient for ReplayingRepository {
    fn retrieve(&self, _uri: &str, _depth: u32) -> Result<ManagedObject, RepositoryError> {
        decode(next_output(&self.replayer, "repository", "retrieve"), "repository::retrieve")
    }

    fn update(&self, _object: &ManagedObject) -> Result<(), RepositoryError> {
        decode(next_output(&self.replayer, "repository", "update"), "repository::update")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use chrono::Utc;
    use serde_json::json;

    fn replaying(outputs: Vec<(&str, serde_json::Value)>) -> ReplayingRepository {
        let interactions = outputs
            .into_iter()
            .enumerate()
            .map(|(seq, (method, output))| Interaction {
                seq: seq as u64,
                port: "repository".into(),
                method: method.into(),
                input: json!({}),
                output,
            })
            .collect();
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            build: "0.1.0".into(),
            interactions,
        };
        ReplayingRepository::new(CassetteReplayer::new(&cassette))
    }

    #[test]
    fn replays_retrieved_object_and_update() {
        let repo = replaying(vec![
            ("retrieve", json!({"Ok": {"uri": "a", "primary_type": "t", "version": 2}})),
            ("update", json!({"Ok": null})),
        ]);
        let obj = repo.retrieve("ignored", 1).unwrap();
        assert_eq!(obj.uri, "a");
        assert_eq!(obj.version, 2);
        assert!(repo.update(&obj).is_ok());
    }

    #[test]
    fn replays_typed_errors() {
        let repo = replaying(vec![(
            "update",
            json!({"Err": {"kind": "conflict", "uri": "a", "expected": 1, "found": 2}}),
        )]);
        let err = repo.update(&ManagedObject::new("a", None)).unwrap_err();
        assert_eq!(err, RepositoryError::Conflict { uri: "a".into(), expected: 1, found: 2 });
    }

    #[test]
    fn malformed_recording_becomes_storage_error() {
        let repo = replaying(vec![("retrieve", json!("garbage"))]);
        assert!(matches!(repo.retrieve("a", 1), Err(RepositoryError::Storage { .. })));
    }
}

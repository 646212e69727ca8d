//! Recording adapter for the `RepositoryClient` port.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_interaction;
use crate::cassette::recorder::CassetteRecorder;
use crate::model::ManagedObject;
use crate::ports::{RepositoryClient, RepositoryError};

/// Records repository interactions while delegating to an inner implementation.
pub struct RecordingRepository {
    inner: Box<dyn RepositoryClient>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingRepository {
    /// Creates a new recording repository wrapping the given implementation.
    pub fn new(inner: Box<dyn RepositoryClient>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct RetrieveInput<'a> {
    uri: &'a str,
    depth: u32,
}

impl RepositoryClient for RecordingRepository {
    fn retrieve(&self, uri: &str, depth: u32) -> Result<ManagedObject, RepositoryError> {
        let result = self.inner.retrieve(uri, depth);
        record_interaction(
            &self.recorder,
            "repository",
            "retrieve",
            &RetrieveInput { uri, depth },
            &result,
        );
        result
    }

    fn update(&self, object: &ManagedObject) -> Result<(), RepositoryError> {
        let result = self.inner.update(object);
        record_interaction(&self.recorder, "repository", "update", object, &result);
        result
    }
}

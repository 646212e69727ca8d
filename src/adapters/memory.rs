//! In-memory repository and deterministic ID generator.

use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use crate::model::ManagedObject;
use crate::ports::{IdGenerator, RepositoryClient, RepositoryError};

/// Applies an update to a set of stored objects.
///
/// The stored version must match the version carried by `object`; on
/// success the stored copy replaces the old one with its version bumped.
pub(crate) fn apply_update(
    objects: &mut BTreeMap<String, ManagedObject>,
    object: &ManagedObject,
) -> Result<(), RepositoryError> {
    let stored = objects
        .get_mut(&object.uri)
        .ok_or_else(|| RepositoryError::NotFound { uri: object.uri.clone() })?;
    if stored.version != object.version {
        return Err(RepositoryError::Conflict {
            uri: object.uri.clone(),
            expected: object.version,
            found: stored.version,
        });
    }
    object.validate().map_err(|e| RepositoryError::Validation {
        uri: object.uri.clone(),
        reason: e.to_string(),
    })?;

    let mut next = object.clone();
    next.version = stored.version + 1;
    *stored = next;
    Ok(())
}

#[derive(Default)]
struct State {
    objects: BTreeMap<String, ManagedObject>,
    retrieve_calls: usize,
    update_calls: usize,
    last_retrieve_depth: Option<u32>,
    retrieve_faults: VecDeque<RepositoryError>,
    update_faults: VecDeque<RepositoryError>,
}

/// Repository holding objects in process memory.
///
/// Counts calls and supports queued faults so tests can observe how a
/// modifier drives its collaborator.
#[derive(Default)]
pub struct InMemoryRepository {
    state: Mutex<State>,
}

impl InMemoryRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository holding the given objects.
    pub fn with_objects(objects: impl IntoIterator<Item = ManagedObject>) -> Self {
        let repo = Self::new();
        for object in objects {
            repo.insert(object);
        }
        repo
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stores an object as the host would on creation, replacing any
    /// object at the same URI.
    pub fn insert(&self, object: ManagedObject) {
        self.lock().objects.insert(object.uri.clone(), object);
    }

    /// Returns the stored object without counting a retrieve.
    #[must_use]
    pub fn get(&self, uri: &str) -> Option<ManagedObject> {
        self.lock().objects.get(uri).cloned()
    }

    /// Number of `retrieve` calls made so far.
    #[must_use]
    pub fn retrieve_calls(&self) -> usize {
        self.lock().retrieve_calls
    }

    /// Number of `update` calls made so far.
    #[must_use]
    pub fn update_calls(&self) -> usize {
        self.lock().update_calls
    }

    /// Depth passed to the most recent `retrieve`.
    #[must_use]
    pub fn last_retrieve_depth(&self) -> Option<u32> {
        self.lock().last_retrieve_depth
    }

    /// Makes the next `retrieve` fail with `error`.
    pub fn fail_next_retrieve(&self, error: RepositoryError) {
        self.lock().retrieve_faults.push_back(error);
    }

    /// Makes the next `update` fail with `error`.
    pub fn fail_next_update(&self, error: RepositoryError) {
        self.lock().update_faults.push_back(error);
    }
}

impl RepositoryClient for InMemoryRepository {
    fn retrieve(&self, uri: &str, depth: u32) -> Result<ManagedObject, RepositoryError> {
        let mut state = self.lock();
        state.retrieve_calls += 1;
        state.last_retrieve_depth = Some(depth);
        if let Some(fault) = state.retrieve_faults.pop_front() {
            return Err(fault);
        }
        state.objects.get(uri).cloned().ok_or_else(|| RepositoryError::NotFound { uri: uri.into() })
    }

    fn update(&self, object: &ManagedObject) -> Result<(), RepositoryError> {
        let mut state = self.lock();
        state.update_calls += 1;
        if let Some(fault) = state.update_faults.pop_front() {
            return Err(fault);
        }
        apply_update(&mut state.objects, object)
    }
}

/// Generates `<prefix>-1`, `<prefix>-2`, ... in order.
pub struct SequenceIdGenerator {
    prefix: String,
    next: AtomicUsize,
}

impl SequenceIdGenerator {
    /// Creates a generator with the given prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into(), next: AtomicUsize::new(0) }
    }

    /// Number of identifiers issued so far.
    #[must_use]
    pub fn issued(&self) -> usize {
        self.next.load(Ordering::SeqCst)
    }
}

impl IdGenerator for SequenceIdGenerator {
    fn generate_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::SeqCst) + 1;
        format!("{}-{n}", self.prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ObjectSchema;

    fn repo() -> InMemoryRepository {
        InMemoryRepository::with_objects([ManagedObject::new("a", None)])
    }

    #[test]
    fn retrieve_returns_independent_copy() {
        let repo = repo();
        let mut copy = repo.retrieve("a", 1).unwrap();
        copy.properties.insert("k".into(), "v".into());
        assert!(repo.get("a").unwrap().properties.is_empty());
        assert_eq!(repo.retrieve_calls(), 1);
    }

    #[test]
    fn retrieve_missing_is_not_found() {
        let err = repo().retrieve("missing", 1).unwrap_err();
        assert_eq!(err, RepositoryError::NotFound { uri: "missing".into() });
    }

    #[test]
    fn update_bumps_version() {
        let repo = repo();
        let copy = repo.retrieve("a", 1).unwrap().with_property("k", "v");
        repo.update(&copy).unwrap();
        let stored = repo.get("a").unwrap();
        assert_eq!(stored.version, 1);
        assert_eq!(stored.property("k"), Some("v"));
    }

    #[test]
    fn stale_update_conflicts() {
        let repo = repo();
        let first = repo.retrieve("a", 1).unwrap();
        let second = repo.retrieve("a", 1).unwrap();
        repo.update(&first).unwrap();
        let err = repo.update(&second).unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict { expected: 0, found: 1, .. }));
    }

    #[test]
    fn update_validates_schema() {
        let repo = InMemoryRepository::with_objects([
            ManagedObject::new("a", None).with_schema(ObjectSchema::allowing(["ok"]))
        ]);
        let copy = repo.retrieve("a", 1).unwrap().with_property("bad", "v");
        assert!(matches!(repo.update(&copy), Err(RepositoryError::Validation { .. })));
    }

    #[test]
    fn queued_faults_fire_once() {
        let repo = repo();
        repo.fail_next_retrieve(RepositoryError::Storage { reason: "down".into() });
        assert!(repo.retrieve("a", 1).is_err());
        assert!(repo.retrieve("a", 1).is_ok());
        assert_eq!(repo.retrieve_calls(), 2);
    }

    #[test]
    fn sequence_ids_are_ordered() {
        let ids = SequenceIdGenerator::new("t");
        assert_eq!(ids.generate_id(), "t-1");
        assert_eq!(ids.generate_id(), "t-2");
        assert_eq!(ids.issued(), 2);
    }
}

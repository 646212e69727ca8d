//! Repository backed by a YAML document on disk.
//!
//! File layout:
//!
//! ```yaml
//! objects:
//!   - uri: 5a1c0f2e-...
//!     primary_type: http://.../GovernanceEnablementModel#ServiceVersion
//!     version: 0
//!     properties:
//!       gep63_consumerIdentifier: 0d3f...
//! ```
//!
//! The document is read on every call and replaced on every successful
//! update, so separate processes see each other's changes. Writers hold an
//! exclusive lock on a sibling `<store>.lock` file across the whole
//! read-check-write, and the new document is renamed into place, so readers
//! never see a partial file.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use fd_lock::RwLock;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::adapters::memory::apply_update;
use crate::model::ManagedObject;
use crate::ports::{RepositoryClient, RepositoryError};

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default)]
    objects: Vec<ManagedObject>,
}

fn storage(reason: String) -> RepositoryError {
    RepositoryError::Storage { reason }
}

/// Repository persisted as a single YAML file.
///
/// Handles are cheap; any number of them, in any number of processes, may
/// point at the same file.
pub struct FileRepository {
    path: PathBuf,
}

impl FileRepository {
    /// Opens the store at `path`. A missing file is treated as empty.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parent_dir(&self) -> Result<&Path, RepositoryError> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent)
            .map_err(|e| storage(format!("failed to create {}: {e}", parent.display())))?;
        Ok(parent)
    }

    fn lock_file(&self) -> Result<RwLock<File>, RepositoryError> {
        self.parent_dir()?;
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".lock");
        let lock_path = PathBuf::from(name);
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .map_err(|e| storage(format!("failed to open {}: {e}", lock_path.display())))?;
        Ok(RwLock::new(file))
    }

    /// Runs `f` on the current contents while holding the writer lock and
    /// saves the result if `f` succeeds.
    fn modify<F>(&self, f: F) -> Result<(), RepositoryError>
    where
        F: FnOnce(&mut BTreeMap<String, ManagedObject>) -> Result<(), RepositoryError>,
    {
        let mut lock = self.lock_file()?;
        let _guard = lock
            .write()
            .map_err(|e| storage(format!("failed to lock {}: {e}", self.path.display())))?;
        let mut objects = self.load()?;
        f(&mut objects)?;
        self.save(objects)
    }

    fn load(&self) -> Result<BTreeMap<String, ManagedObject>, RepositoryError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| storage(format!("failed to read {}: {e}", self.path.display())))?;
        let doc: StoreDocument = serde_yaml::from_str(&content)
            .map_err(|e| storage(format!("failed to parse {}: {e}", self.path.display())))?;
        Ok(doc.objects.into_iter().map(|o| (o.uri.clone(), o)).collect())
    }

    fn save(&self, objects: BTreeMap<String, ManagedObject>) -> Result<(), RepositoryError> {
        let doc = StoreDocument { objects: objects.into_values().collect() };
        let yaml = serde_yaml::to_string(&doc)
            .map_err(|e| storage(format!("failed to serialize store: {e}")))?;
        let write_err = |e: std::io::Error| {
            storage(format!("failed to write {}: {e}", self.path.display()))
        };
        let mut temp = NamedTempFile::new_in(self.parent_dir()?).map_err(write_err)?;
        temp.write_all(yaml.as_bytes()).map_err(write_err)?;
        temp.as_file().sync_all().map_err(write_err)?;
        temp.persist(&self.path).map_err(|e| write_err(e.error))?;
        Ok(())
    }

    /// Adds a newly created object, as the host does before firing its
    /// creation callbacks.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Validation`] if the URI is already taken,
    /// or a storage error if the file cannot be read or written.
    pub fn create(&self, object: ManagedObject) -> Result<(), RepositoryError> {
        self.modify(|objects| {
            if objects.contains_key(&object.uri) {
                return Err(RepositoryError::Validation {
                    uri: object.uri,
                    reason: "an object with this URI already exists".into(),
                });
            }
            objects.insert(object.uri.clone(), object);
            Ok(())
        })
    }

    /// Lists every stored object.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the file cannot be read.
    pub fn list(&self) -> Result<Vec<ManagedObject>, RepositoryError> {
        Ok(self.load()?.into_values().collect())
    }
}

impl RepositoryClient for FileRepository {
    fn retrieve(&self, uri: &str, _depth: u32) -> Result<ManagedObject, RepositoryError> {
        self.load()?.remove(uri).ok_or_else(|| RepositoryError::NotFound { uri: uri.into() })
    }

    fn update(&self, object: &ManagedObject) -> Result<(), RepositoryError> {
        self.modify(|objects| apply_update(objects, object))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(name: &str) -> (PathBuf, FileRepository) {
        let dir = std::env::temp_dir().join(name);
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("store.yaml");
        (dir, FileRepository::new(&path))
    }

    #[test]
    fn missing_file_is_empty() {
        let (dir, repo) = store("registry_idgen_file_repo_empty");
        assert!(repo.list().unwrap().is_empty());
        assert!(matches!(repo.retrieve("x", 1), Err(RepositoryError::NotFound { .. })));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn create_then_update_persists_to_disk() {
        let (dir, repo) = store("registry_idgen_file_repo_update");
        repo.create(ManagedObject::new("a", Some("t".into())).with_name("Alpha")).unwrap();

        let copy = repo.retrieve("a", 1).unwrap().with_property("k", "v");
        repo.update(&copy).unwrap();

        let reopened = FileRepository::new(repo.path());
        let stored = reopened.retrieve("a", 1).unwrap();
        assert_eq!(stored.property("k"), Some("v"));
        assert_eq!(stored.version, 1);
        assert_eq!(stored.name.as_deref(), Some("Alpha"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn duplicate_create_is_rejected() {
        let (dir, repo) = store("registry_idgen_file_repo_dup");
        repo.create(ManagedObject::new("a", None)).unwrap();
        assert!(matches!(
            repo.create(ManagedObject::new("a", None)),
            Err(RepositoryError::Validation { .. })
        ));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn stale_copy_from_another_handle_conflicts() {
        let (dir, repo) = store("registry_idgen_file_repo_stale");
        repo.create(ManagedObject::new("a", None)).unwrap();
        let other = FileRepository::new(repo.path());

        let first = repo.retrieve("a", 1).unwrap().with_property("k", "1");
        let second = other.retrieve("a", 1).unwrap().with_property("k", "2");
        other.update(&second).unwrap();

        assert!(matches!(
            repo.update(&first),
            Err(RepositoryError::Conflict { expected: 0, found: 1, .. })
        ));
        assert_eq!(repo.retrieve("a", 1).unwrap().property("k"), Some("2"));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn concurrent_creates_through_separate_handles_are_all_kept() {
        let (dir, repo) = store("registry_idgen_file_repo_concurrent_create");
        let path = repo.path().to_path_buf();

        std::thread::scope(|scope| {
            for i in 0..8 {
                let path = &path;
                scope.spawn(move || {
                    FileRepository::new(path)
                        .create(ManagedObject::new(format!("o{i}"), None))
                        .unwrap();
                });
            }
        });

        assert_eq!(repo.list().unwrap().len(), 8);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn corrupt_file_reports_storage_error() {
        let (dir, repo) = store("registry_idgen_file_repo_corrupt");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(repo.path(), "objects: [not, {valid").unwrap();
        assert!(matches!(repo.retrieve("a", 1), Err(RepositoryError::Storage { .. })));
        let _ = std::fs::remove_dir_all(&dir);
    }
}

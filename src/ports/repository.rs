//! Repository client port for retrieving and saving managed objects.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ManagedObject;

/// Error reported by a repository client.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum RepositoryError {
    /// No object exists at the URI.
    #[error("object {uri} not found")]
    NotFound {
        /// Requested URI.
        uri: String,
    },
    /// The caller may not read or write the object.
    #[error("access to {uri} denied: {reason}")]
    AccessDenied {
        /// Object URI.
        uri: String,
        /// Host-supplied reason.
        reason: String,
    },
    /// The object changed since it was retrieved.
    #[error("object {uri} was modified concurrently (expected version {expected}, found {found})")]
    Conflict {
        /// Object URI.
        uri: String,
        /// Version carried by the update.
        expected: u64,
        /// Version currently stored.
        found: u64,
    },
    /// The repository rejected the object's contents.
    #[error("object {uri} failed validation: {reason}")]
    Validation {
        /// Object URI.
        uri: String,
        /// Validation message.
        reason: String,
    },
    /// The backing store could not be read or written.
    #[error("repository storage error: {reason}")]
    Storage {
        /// What went wrong.
        reason: String,
    },
}

/// Retrieves and persists objects in the host repository.
///
/// All consistency, concurrency, and durability guarantees belong to the
/// implementation. Callers issue each operation at most once and never
/// retry.
pub trait RepositoryClient: Send + Sync {
    /// Retrieves a fresh, caller-owned copy of the object at `uri`.
    ///
    /// `depth` bounds how far related objects are expanded; `1` returns the
    /// object with its direct properties.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] or
    /// [`RepositoryError::AccessDenied`].
    fn retrieve(&self, uri: &str, depth: u32) -> Result<ManagedObject, RepositoryError>;

    /// Saves a modified copy of an object.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Conflict`],
    /// [`RepositoryError::AccessDenied`], or [`RepositoryError::Validation`].
    fn update(&self, object: &ManagedObject) -> Result<(), RepositoryError>;
}

//! Modifier plugin surface and the identifier-assigning implementation.
//!
//! The host drives a [`RegistryModifier`] with one callback per object
//! lifecycle event. [`IdentifierModifier`] reacts to creation of version
//! and SLA objects; everything else passes through untouched.

pub mod classify;
pub mod identifier;
pub mod writer;

pub use classify::{classify, recognized_types, TypeTag};
pub use identifier::{IdentifierModifier, ModifierOptions};
pub use writer::{apply_identifier, WriteMode};

use crate::model::{ManagedObject, ObjectRef, Status};

/// Callback interface a host repository invokes on object lifecycle events.
///
/// Implementations must not panic or return errors out of band: every
/// outcome, including collaborator failures, is reported through the
/// returned [`Status`].
///
/// The one exception is a modifier wired to replaying adapters. A cassette
/// that runs out, or whose recorded id is not a string, panics with the
/// offending port and method, because the run has diverged from the
/// recording and no status would be meaningful.
pub trait RegistryModifier: Send + Sync {
    /// Called after an object has been created.
    fn on_create(&self, object: &ObjectRef) -> Status;

    /// Called after an object has been updated.
    fn on_update(&self, before: &ManagedObject, after: &ManagedObject) -> Status;

    /// Called after an object has been deleted.
    fn on_delete(&self, object: &ObjectRef) -> Status;
}

//! Assigns generated consumer and context identifiers on object creation.

use tracing::{debug, error, info, Span};

use super::classify::classify;
use super::writer::apply_identifier;
use super::RegistryModifier;
use crate::context::ServiceContext;
use crate::model::{Failure, ManagedObject, ObjectKind, ObjectRef, Status};
use crate::ports::{IdGenerator, RepositoryClient};

/// Tunables for [`IdentifierModifier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModifierOptions {
    /// Depth passed to [`RepositoryClient::retrieve`].
    pub retrieve_depth: u32,
    /// Whether to save the retrieved copy even when writing the identifier
    /// property failed.
    pub persist_on_write_failure: bool,
}

impl Default for ModifierOptions {
    fn default() -> Self {
        Self { retrieve_depth: 1, persist_on_write_failure: true }
    }
}

/// Modifier that gives every new version a consumer identifier and every
/// new SLA a context identifier.
///
/// Each call classifies the created object's primary type, generates a
/// UUID, re-retrieves the object, sets the target property, and saves the
/// copy. The reference carried by the event is never modified. All log
/// events are emitted inside the span supplied at construction.
pub struct IdentifierModifier<'a> {
    repository: &'a dyn RepositoryClient,
    id_gen: &'a dyn IdGenerator,
    options: ModifierOptions,
    span: Span,
}

impl<'a> IdentifierModifier<'a> {
    /// Creates a modifier over the given collaborators.
    pub fn new(
        repository: &'a dyn RepositoryClient,
        id_gen: &'a dyn IdGenerator,
        options: ModifierOptions,
        span: Span,
    ) -> Self {
        Self { repository, id_gen, options, span }
    }

    /// Creates a modifier using the ports of a service context.
    pub fn from_context(ctx: &'a ServiceContext, options: ModifierOptions, span: Span) -> Self {
        Self::new(ctx.repository.as_ref(), ctx.id_gen.as_ref(), options, span)
    }

    /// Options this modifier was built with.
    #[must_use]
    pub fn options(&self) -> ModifierOptions {
        self.options
    }

    fn assign(&self, object: &ObjectRef, property: &str, status: &mut Status) {
        let id = self.id_gen.generate_id();

        let mut copy = match self.repository.retrieve(&object.uri, self.options.retrieve_depth) {
            Ok(copy) => copy,
            Err(source) => {
                error!(uri = %object.uri, error = %source, "exception retrieving object");
                status.record(Failure::Retrieval { uri: object.uri.clone(), source });
                return;
            }
        };

        let written = match apply_identifier(&mut copy, property, &id) {
            Ok(mode) => {
                info!(uri = %object.uri, property, id = %id, ?mode, "assigned identifier");
                true
            }
            Err(source) => {
                error!(
                    uri = %object.uri,
                    property,
                    error = %source,
                    "exception updating property"
                );
                status.record(Failure::PropertyWrite { property: property.to_string(), source });
                false
            }
        };

        if !written && !self.options.persist_on_write_failure {
            debug!(uri = %object.uri, "skipping save after failed property write");
            return;
        }

        self.persist(&copy, status);
    }

    fn persist(&self, copy: &ManagedObject, status: &mut Status) {
        if let Err(source) = self.repository.update(copy) {
            error!(uri = %copy.uri, error = %source, "exception saving object");
            status.record(Failure::Persist { uri: copy.uri.clone(), source });
        }
    }
}

impl RegistryModifier for IdentifierModifier<'_> {
    fn on_create(&self, object: &ObjectRef) -> Status {
        let _entered = self.span.enter();
        debug!(
            uri = %object.uri,
            kind = %object.kind,
            primary_type = object.primary_type.as_deref(),
            "entering on_create"
        );

        let mut status = Status::ok();
        if object.kind == ObjectKind::Generic {
            if let Some(tag) = classify(object.primary_type.as_deref()) {
                self.assign(object, tag.target_property(), &mut status);
            }
        }

        debug!(
            uri = %object.uri,
            code = %status.code,
            failures = status.failures.len(),
            "exiting on_create"
        );
        status
    }

    fn on_update(&self, _before: &ManagedObject, _after: &ManagedObject) -> Status {
        Status::ok()
    }

    fn on_delete(&self, _object: &ObjectRef) -> Status {
        Status::ok()
    }
}

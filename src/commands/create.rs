//! `registry-idgen create` command.
//!
//! Plays the host's part for a single object: stores it, fires the
//! creation callback, and reports what the modifier did.

use std::path::Path;

use tracing::info_span;

use crate::adapters::live::{FileRepository, LiveIdGenerator};
use crate::config::ModifierConfig;
use crate::context::ServiceContext;
use crate::model::{ManagedObject, ObjectKind, ObjectRef, Status};
use crate::modifier::{classify, IdentifierModifier, RegistryModifier};
use crate::ports::{IdGenerator, RepositoryClient};

/// Object to create.
#[derive(Debug, Clone)]
pub struct CreateRequest {
    /// URI to use; generated when `None`.
    pub uri: Option<String>,
    /// Primary type.
    pub primary_type: Option<String>,
    /// Runtime kind.
    pub kind: ObjectKind,
    /// Display name.
    pub name: Option<String>,
}

/// What happened to the created object.
#[derive(Debug)]
pub struct CreateReport {
    /// URI of the created object.
    pub uri: String,
    /// Status returned by the creation callback.
    pub status: Status,
    /// Identifier property and value after the callback, if one applies.
    pub assigned: Option<(String, Option<String>)>,
}

/// Create the object in `store` and run the modifier on it.
///
/// # Errors
///
/// Returns an error string if the object cannot be added to the store.
/// Modifier failures are reported in the returned status instead.
pub fn execute(
    ctx: &ServiceContext,
    store: &Path,
    request: &CreateRequest,
    config: &ModifierConfig,
) -> Result<CreateReport, String> {
    let uri = request.uri.clone().unwrap_or_else(|| LiveIdGenerator::new().generate_id());
    let host = FileRepository::new(store);

    let mut object = ManagedObject::new(uri.clone(), request.primary_type.clone());
    object.name.clone_from(&request.name);
    host.create(object).map_err(|e| format!("Failed to create object {uri}: {e}"))?;

    let span = info_span!("identifier_modifier", store = %store.display());
    let modifier = IdentifierModifier::from_context(ctx, config.modifier_options(), span);
    let event = ObjectRef {
        uri: uri.clone(),
        kind: request.kind,
        primary_type: request.primary_type.clone(),
    };
    let status = modifier.on_create(&event);

    let assigned = match (request.kind, classify(request.primary_type.as_deref())) {
        (ObjectKind::Generic, Some(tag)) => {
            let property = tag.target_property();
            let value = host
                .retrieve(&uri, 1)
                .ok()
                .and_then(|o| o.property(property).map(str::to_string));
            Some((property.to_string(), value))
        }
        _ => None,
    };

    Ok(CreateReport { uri, status, assigned })
}

/// Execute the `create` command.
///
/// # Errors
///
/// Returns an error string if the object cannot be created or the
/// creation callback reports an error status.
pub fn run(
    ctx: &ServiceContext,
    store: &Path,
    request: &CreateRequest,
    config: &ModifierConfig,
) -> Result<(), String> {
    let report = execute(ctx, store, request, config)?;

    println!("uri: {}", report.uri);
    if let Some((property, value)) = &report.assigned {
        println!("{property}: {}", value.as_deref().unwrap_or("<unset>"));
    }
    if report.status.is_ok() {
        println!("status: {}", report.status);
        Ok(())
    } else {
        Err(format!("status: {}", report.status))
    }
}

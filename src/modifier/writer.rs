//! Writes a generated identifier onto a retrieved object.

use serde::Serialize;

use crate::model::{PropertyError, PropertySet};

/// How a property assignment was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// The property did not exist and was added.
    Added,
    /// The property existed and its value was replaced.
    Overwritten,
}

/// Sets `property` to `value`, overwriting it if present and adding it
/// otherwise.
///
/// # Errors
///
/// Propagates the [`PropertyError`] raised by the object when it rejects
/// the property.
pub fn apply_identifier<P>(
    object: &mut P,
    property: &str,
    value: &str,
) -> Result<WriteMode, PropertyError>
where
    P: PropertySet + ?Sized,
{
    if object.is_set(property) {
        object.set_value(property, value)?;
        Ok(WriteMode::Overwritten)
    } else {
        object.add_property(property, value)?;
        Ok(WriteMode::Added)
    }
}

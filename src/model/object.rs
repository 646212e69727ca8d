//! Managed objects and their property sets.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error raised when a property cannot be written to an object.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum PropertyError {
    /// The object's schema or naming rules reject the property.
    #[error("invalid property {name:?} on {uri}: {reason}")]
    InvalidProperty {
        /// URI of the object being modified.
        uri: String,
        /// Property name that was rejected.
        name: String,
        /// Why the property was rejected.
        reason: String,
    },
}

/// Property names an object's model permits.
///
/// Objects without a schema accept any well-formed property name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectSchema {
    /// Permitted property names.
    pub allowed: BTreeSet<String>,
}

impl ObjectSchema {
    /// Creates a schema permitting exactly the given names.
    pub fn allowing<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { allowed: names.into_iter().map(Into::into).collect() }
    }

    /// Returns `true` if `name` is permitted.
    #[must_use]
    pub fn permits(&self, name: &str) -> bool {
        self.allowed.contains(name)
    }
}

/// A repository object: URI, primary type, and named string properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagedObject {
    /// Repository URI.
    pub uri: String,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Declared primary type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_type: Option<String>,
    /// Concurrency token maintained by the repository.
    #[serde(default)]
    pub version: u64,
    /// User-defined and model properties.
    #[serde(default)]
    pub properties: BTreeMap<String, String>,
    /// Permitted property names, if the model restricts them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<ObjectSchema>,
}

impl ManagedObject {
    /// Creates an object with no properties.
    pub fn new(uri: impl Into<String>, primary_type: Option<String>) -> Self {
        Self {
            uri: uri.into(),
            name: None,
            primary_type,
            version: 0,
            properties: BTreeMap::new(),
            schema: None,
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets a property directly, bypassing schema checks.
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Restricts the object to the given schema.
    #[must_use]
    pub fn with_schema(mut self, schema: ObjectSchema) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Returns the value of a property.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    /// Checks that every property present is permitted by the schema.
    ///
    /// # Errors
    ///
    /// Returns the first offending property.
    pub fn validate(&self) -> Result<(), PropertyError> {
        self.properties.keys().try_for_each(|name| self.check_name(name))
    }

    fn check_name(&self, name: &str) -> Result<(), PropertyError> {
        let reason = if name.is_empty() {
            Some("property name is empty")
        } else if name.chars().any(char::is_whitespace) {
            Some("property name contains whitespace")
        } else if self.schema.as_ref().is_some_and(|schema| !schema.permits(name)) {
            Some("property is not defined by the object's model")
        } else {
            None
        };
        match reason {
            Some(reason) => Err(PropertyError::InvalidProperty {
                uri: self.uri.clone(),
                name: name.to_string(),
                reason: reason.to_string(),
            }),
            None => Ok(()),
        }
    }
}

/// Property access on a retrieved object.
pub trait PropertySet {
    /// Returns `true` if the property key exists on the object.
    fn is_set(&self, name: &str) -> bool;

    /// Overwrites the value of an existing property.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::InvalidProperty`] if the name is rejected
    /// or the property does not exist.
    fn set_value(&mut self, name: &str, value: &str) -> Result<(), PropertyError>;

    /// Adds a new property.
    ///
    /// # Errors
    ///
    /// Returns [`PropertyError::InvalidProperty`] if the name is rejected
    /// or the property already exists.
    fn add_property(&mut self, name: &str, value: &str) -> Result<(), PropertyError>;
}

impl PropertySet for ManagedObject {
    fn is_set(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    fn set_value(&mut self, name: &str, value: &str) -> Result<(), PropertyError> {
        self.check_name(name)?;
        match self.properties.get_mut(name) {
            Some(slot) => {
                value.clone_into(slot);
                Ok(())
            }
            None => Err(PropertyError::InvalidProperty {
                uri: self.uri.clone(),
                name: name.to_string(),
                reason: "property is not set".to_string(),
            }),
        }
    }

    fn add_property(&mut self, name: &str, value: &str) -> Result<(), PropertyError> {
        self.check_name(name)?;
        if self.properties.contains_key(name) {
            return Err(PropertyError::InvalidProperty {
                uri: self.uri.clone(),
                name: name.to_string(),
                reason: "property already exists".to_string(),
            });
        }
        self.properties.insert(name.to_string(), value.to_string());
        Ok(())
    }
}

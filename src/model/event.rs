//! Creation and deletion event payloads.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Runtime category of an object as reported by the host.
///
/// Only [`ObjectKind::Generic`] objects are structured business-model
/// objects with a primary type; the document kinds are ignored by the
/// modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ObjectKind {
    /// Structured business-model object.
    #[default]
    Generic,
    /// WSDL document.
    WsdlDocument,
    /// XML schema document.
    XsdDocument,
    /// Plain XML document.
    XmlDocument,
    /// Policy document.
    PolicyDocument,
    /// Binary or otherwise untyped document.
    GenericDocument,
}

impl ObjectKind {
    /// All kinds, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Generic,
        Self::WsdlDocument,
        Self::XsdDocument,
        Self::XmlDocument,
        Self::PolicyDocument,
        Self::GenericDocument,
    ];

    /// Stable kebab-case name used on the command line and in store files.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::WsdlDocument => "wsdl-document",
            Self::XsdDocument => "xsd-document",
            Self::XmlDocument => "xml-document",
            Self::PolicyDocument => "policy-document",
            Self::GenericDocument => "generic-document",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == s).ok_or_else(|| {
            let known: Vec<&str> = Self::ALL.iter().map(|k| k.as_str()).collect();
            format!("unknown object kind {s:?}, expected one of: {}", known.join(", "))
        })
    }
}

/// Reference to an object as delivered in a host event.
///
/// This is a snapshot the host may share with other readers, so the
/// modifier never mutates it. Changes are always made on a copy fetched
/// through the repository client using [`ObjectRef::uri`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectRef {
    /// Repository URI of the object.
    pub uri: String,
    /// Runtime category.
    #[serde(default)]
    pub kind: ObjectKind,
    /// Declared primary type, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_type: Option<String>,
}

impl ObjectRef {
    /// Reference to a generic business object with the given primary type.
    pub fn generic(uri: impl Into<String>, primary_type: impl Into<String>) -> Self {
        Self { uri: uri.into(), kind: ObjectKind::Generic, primary_type: Some(primary_type.into()) }
    }

    /// Reference of the given kind without a primary type.
    pub fn untyped(uri: impl Into<String>, kind: ObjectKind) -> Self {
        Self { uri: uri.into(), kind, primary_type: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_parses_from_display_name() {
        for kind in ObjectKind::ALL {
            assert_eq!(kind.to_string().parse::<ObjectKind>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_kind_lists_alternatives() {
        let err = "document".parse::<ObjectKind>().unwrap_err();
        assert!(err.contains("wsdl-document"));
    }

    #[test]
    fn object_ref_defaults_to_generic_kind() {
        let parsed: ObjectRef = serde_yaml::from_str("uri: abc-123\n").unwrap();
        assert_eq!(parsed.kind, ObjectKind::Generic);
        assert!(parsed.primary_type.is_none());
    }
}

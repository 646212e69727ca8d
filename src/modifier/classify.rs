//! Primary-type classification.

use std::fmt;

use serde::Serialize;

/// Namespace of the governance enablement model.
pub const GEP_BASE: &str =
    "http://www.ibm.com/xmlns/prod/serviceregistry/profile/v6r3/GovernanceEnablementModel#";
/// Namespace of the governance profile extensions.
pub const XGEP_BASE: &str =
    "http://www.ibm.com/xmlns/prod/serviceregistry/profile/v6r3/GovernanceProfileExtensions#";

/// Primary type of a service version.
pub const SERVICE_VERSION: &str =
    "http://www.ibm.com/xmlns/prod/serviceregistry/profile/v6r3/GovernanceEnablementModel#ServiceVersion";
/// Primary type of an application version.
pub const APPLICATION_VERSION: &str =
    "http://www.ibm.com/xmlns/prod/serviceregistry/profile/v6r3/GovernanceEnablementModel#ApplicationVersion";
/// Primary type of an SLA in the enablement model.
pub const GEP_SERVICE_LEVEL_AGREEMENT: &str =
    "http://www.ibm.com/xmlns/prod/serviceregistry/profile/v6r3/GovernanceEnablementModel#ServiceLevelAgreement";
/// Primary type of an SLA in the profile extensions.
pub const XGEP_SERVICE_LEVEL_AGREEMENT: &str =
    "http://www.ibm.com/xmlns/prod/serviceregistry/profile/v6r3/GovernanceProfileExtensions#ServiceLevelAgreement";

/// Property holding the consumer identifier of a version.
pub const CONSUMER_IDENTIFIER: &str = "gep63_consumerIdentifier";
/// Property holding the context identifier of an SLA.
pub const CONTEXT_IDENTIFIER: &str = "gep63_contextIdentifier";

/// Business-model categories that receive a generated identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TypeTag {
    /// Service or application version.
    Version,
    /// Service level agreement.
    ServiceLevelAgreement,
}

impl TypeTag {
    /// Property the generated identifier is written to.
    #[must_use]
    pub fn target_property(self) -> &'static str {
        match self {
            Self::Version => CONSUMER_IDENTIFIER,
            Self::ServiceLevelAgreement => CONTEXT_IDENTIFIER,
        }
    }

    /// Short name used in output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Version => "version",
            Self::ServiceLevelAgreement => "service-level-agreement",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every recognized primary type with its category.
#[must_use]
pub fn recognized_types() -> [(&'static str, TypeTag); 4] {
    [
        (SERVICE_VERSION, TypeTag::Version),
        (APPLICATION_VERSION, TypeTag::Version),
        (GEP_SERVICE_LEVEL_AGREEMENT, TypeTag::ServiceLevelAgreement),
        (XGEP_SERVICE_LEVEL_AGREEMENT, TypeTag::ServiceLevelAgreement),
    ]
}

/// Classifies a primary type by exact string equality.
#[must_use]
pub fn classify(primary_type: Option<&str>) -> Option<TypeTag> {
    match primary_type? {
        SERVICE_VERSION | APPLICATION_VERSION => Some(TypeTag::Version),
        GEP_SERVICE_LEVEL_AGREEMENT | XGEP_SERVICE_LEVEL_AGREEMENT => {
            Some(TypeTag::ServiceLevelAgreement)
        }
        _ => None,
    }
}

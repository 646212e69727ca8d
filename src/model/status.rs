//! Status returned to the host after each callback.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::object::PropertyError;
use crate::ports::RepositoryError;

/// Overall outcome of a callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnCode {
    /// No failure was recorded.
    #[default]
    Ok,
    /// At least one failure was recorded.
    Error,
}

impl fmt::Display for ReturnCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ok => "OK",
            Self::Error => "ERROR",
        })
    }
}

/// A single failed step of the creation protocol.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "kebab-case")]
pub enum Failure {
    /// The fresh copy could not be retrieved.
    #[error("failed to retrieve {uri}")]
    Retrieval {
        /// URI that was requested.
        uri: String,
        /// Repository error.
        #[source]
        source: RepositoryError,
    },
    /// The identifier property could not be written.
    #[error("failed to write property {property}")]
    PropertyWrite {
        /// Target property.
        property: String,
        /// Property error.
        #[source]
        source: PropertyError,
    },
    /// The modified copy could not be saved.
    #[error("failed to save {uri}")]
    Persist {
        /// URI of the object being saved.
        uri: String,
        /// Repository error.
        #[source]
        source: RepositoryError,
    },
}

impl Failure {
    /// Message including the wrapped collaborator error.
    #[must_use]
    pub fn detail(&self) -> String {
        let source: &dyn std::error::Error = match self {
            Self::Retrieval { source, .. } | Self::Persist { source, .. } => source,
            Self::PropertyWrite { source, .. } => source,
        };
        format!("{self}: {source}")
    }
}

/// Outcome of a callback with every failure that was recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    /// Aggregate return code.
    pub code: ReturnCode,
    /// Failures in the order they occurred.
    pub failures: Vec<Failure>,
}

impl Status {
    /// A successful status with no failures.
    #[must_use]
    pub fn ok() -> Self {
        Self::default()
    }

    /// Records a failure and marks the status as an error.
    pub fn record(&mut self, failure: Failure) {
        self.code = ReturnCode::Error;
        self.failures.push(failure);
    }

    /// Returns `true` if no failure was recorded.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.code == ReturnCode::Ok
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code)?;
        for failure in &self.failures {
            write!(f, "\n  - {}", failure.detail())?;
        }
        Ok(())
    }
}

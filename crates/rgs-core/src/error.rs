//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error taxonomy of the Records Governance Stack. All errors
//! use `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Read failures against the host store are `ResolutionError` and always
//!   propagate; a resolver never converts one into a silent `false`.
//! - A vetoed mutation is `AccessDenied` and carries the acting identity,
//!   the protected artifact, and the item so calling layers can render an
//!   actionable message.
//! - A protected artifact registered with no capability that could ever
//!   unlock it is a `ConfigurationError` at registration time, not a
//!   runtime denial.
//! - None of these are retried: a denied mutation is not a transient
//!   failure.

use thiserror::Error;

use crate::attrs::ArtifactId;
use crate::item::ItemRef;

/// The host store or permission backend could not answer a read query.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    /// A referenced item does not exist in the host store.
    #[error("item not found: {item}")]
    NotFound {
        /// The missing item.
        item: ItemRef,
    },

    /// The backend failed to answer (connectivity, internal fault).
    #[error("backend read failed: {detail}")]
    Backend {
        /// Backend-supplied failure detail.
        detail: String,
    },
}

/// A mutation was vetoed because no qualifying capability was granted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("identity {identity:?} may not edit {artifact} on {item}")]
pub struct AccessDenied {
    /// Name of the acting identity that was refused.
    pub identity: String,
    /// The protected artifact the write targeted.
    pub artifact: ArtifactId,
    /// The item the write targeted.
    pub item: ItemRef,
}

/// A registration-time configuration mistake.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// A protected artifact was registered with an empty capability set,
    /// which would make the artifact permanently immutable for every
    /// caller.
    #[error("protected artifact {artifact} registered with an empty capability set")]
    EmptyCapabilitySet {
        /// The offending artifact identifier.
        artifact: ArtifactId,
    },
}

/// Top-level error type aggregating the full taxonomy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GovernanceError {
    /// A read against the host store failed.
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// A mutation was vetoed.
    #[error(transparent)]
    AccessDenied(#[from] AccessDenied),

    /// Registration-time misconfiguration.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attrs::AttrKey;

    #[test]
    fn test_access_denied_names_the_artifact() {
        let denied = AccessDenied {
            identity: "jbloggs".to_string(),
            artifact: ArtifactId::Attribute(AttrKey::new("title")),
            item: ItemRef::new(),
        };
        let message = denied.to_string();
        assert!(message.contains("jbloggs"));
        assert!(message.contains("attribute:title"));
    }

    #[test]
    fn test_governance_error_wraps_taxonomy() {
        let err: GovernanceError = ResolutionError::Backend {
            detail: "connection refused".to_string(),
        }
        .into();
        assert!(matches!(err, GovernanceError::Resolution(_)));
    }
}

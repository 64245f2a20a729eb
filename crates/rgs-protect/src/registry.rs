//! # Protected-Artifact Registry
//!
//! Maps protected attribute and category identifiers to the capabilities
//! that authorize editing them. Registration is an upsert keyed by artifact
//! identifier: the last registration for an identifier wins outright, no
//! merging of capability sets.
//!
//! Registering an artifact with an empty capability set is rejected at
//! registration time: no capability could ever unlock it, so every caller
//! would be locked out permanently. That is a configuration mistake, not a
//! runtime condition.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use rgs_capability::CapabilityName;
use rgs_core::{ArtifactId, ConfigurationError};

/// A protected attribute or category and the capabilities that unlock it.
///
/// At least one of the capabilities must evaluate `Allowed` on the item
/// for a write to the artifact to be permitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtectedArtifact {
    /// The protected attribute or category.
    pub id: ArtifactId,
    /// Capabilities, any one of which authorizes an edit.
    pub capabilities: BTreeSet<CapabilityName>,
}

impl ProtectedArtifact {
    /// Describe a protected artifact.
    pub fn new(
        id: impl Into<ArtifactId>,
        capabilities: impl IntoIterator<Item = CapabilityName>,
    ) -> Self {
        Self {
            id: id.into(),
            capabilities: capabilities.into_iter().collect(),
        }
    }
}

/// The process-wide table of protected artifacts.
///
/// Mutable only through `register` during the host's initialization phase;
/// shared immutably (typically as `Arc<ProtectedArtifactRegistry>`)
/// afterwards, so steady-state lookups take no lock.
#[derive(Debug, Clone, Default)]
pub struct ProtectedArtifactRegistry {
    entries: BTreeMap<ArtifactId, ProtectedArtifact>,
}

impl ProtectedArtifactRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a protected artifact. Idempotent per identifier: a later
    /// registration for the same identifier replaces the earlier one.
    ///
    /// # Errors
    ///
    /// [`ConfigurationError::EmptyCapabilitySet`] if the artifact lists no
    /// capabilities.
    pub fn register(&mut self, artifact: ProtectedArtifact) -> Result<(), ConfigurationError> {
        if artifact.capabilities.is_empty() {
            return Err(ConfigurationError::EmptyCapabilitySet {
                artifact: artifact.id,
            });
        }
        self.entries.insert(artifact.id.clone(), artifact);
        Ok(())
    }

    /// Whether the identifier is registered as protected.
    pub fn is_protected(&self, id: &ArtifactId) -> bool {
        self.entries.contains_key(id)
    }

    /// Look up the registered artifact for an identifier.
    pub fn lookup(&self, id: &ArtifactId) -> Option<&ProtectedArtifact> {
        self.entries.get(id)
    }

    /// The set of protected identifiers.
    pub fn protected_identifiers(&self) -> BTreeSet<ArtifactId> {
        self.entries.keys().cloned().collect()
    }
}

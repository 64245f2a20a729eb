//! # rgs-capability — Capability Access Evaluator
//!
//! A capability is a named permission check against an item, composed from
//! the raw authority checks the host's identity backend supplies. This
//! crate owns the capability definition table and the evaluator that turns
//! a set of capability names into per-name `Allowed`/`Denied` answers.
//!
//! ## Design
//!
//! - A capability grants iff the identity holds **every** backend authority
//!   the definition lists on the item. An empty authority list grants
//!   unconditionally (used for open capabilities).
//! - A requested name with no definition evaluates `Denied`, never an
//!   error: an unknown capability is indistinguishable from one the caller
//!   lacks.
//! - `evaluate` returns exactly one entry per requested name; it never
//!   omits a name.
//! - The evaluator is stateless between calls; nothing is cached.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use rgs_core::{ActingIdentity, AuthorityBackend, ItemRef, ResolutionError};

/// Stable name of a capability (for example `"EditRecordMetadata"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CapabilityName(pub String);

impl CapabilityName {
    /// Construct a capability name from anything string-like.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Access the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CapabilityName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The outcome of evaluating one capability against one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessState {
    /// The identity holds the capability on the item.
    Allowed,
    /// The identity does not hold the capability on the item.
    Denied,
}

impl AccessState {
    /// Whether this is `Allowed`.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Definition of a single capability: the backend authorities it composes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityDefinition {
    /// The capability's stable name.
    pub name: CapabilityName,
    /// Backend authorities that must all hold on the item.
    pub authorities: Vec<String>,
}

impl CapabilityDefinition {
    /// Define a capability over the given backend authorities.
    pub fn new(
        name: impl Into<String>,
        authorities: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: CapabilityName::new(name),
            authorities: authorities.into_iter().map(Into::into).collect(),
        }
    }
}

/// The capability definition table. Defining a name twice replaces the
/// earlier definition.
#[derive(Debug, Clone, Default)]
pub struct CapabilitySet {
    definitions: BTreeMap<CapabilityName, CapabilityDefinition>,
}

impl CapabilitySet {
    /// An empty definition table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert a definition, keyed by capability name.
    pub fn define(&mut self, definition: CapabilityDefinition) {
        self.definitions.insert(definition.name.clone(), definition);
    }

    /// Look up a definition by name.
    pub fn get(&self, name: &CapabilityName) -> Option<&CapabilityDefinition> {
        self.definitions.get(name)
    }

    /// The defined capability names.
    pub fn names(&self) -> impl Iterator<Item = &CapabilityName> {
        self.definitions.keys()
    }
}

/// Evaluates named capabilities for an identity against an item.
#[derive(Clone)]
pub struct CapabilityEvaluator {
    definitions: CapabilitySet,
    backend: Arc<dyn AuthorityBackend>,
}

impl CapabilityEvaluator {
    /// Build an evaluator over a definition table and the host backend.
    pub fn new(definitions: CapabilitySet, backend: Arc<dyn AuthorityBackend>) -> Self {
        Self {
            definitions,
            backend,
        }
    }

    /// Evaluate every requested capability name against the item.
    ///
    /// The result carries exactly one entry per requested name.
    pub fn evaluate(
        &self,
        identity: &ActingIdentity,
        item: &ItemRef,
        names: &BTreeSet<CapabilityName>,
    ) -> Result<BTreeMap<CapabilityName, AccessState>, ResolutionError> {
        let mut result = BTreeMap::new();
        for name in names {
            result.insert(name.clone(), self.access_state(identity, item, name)?);
        }
        Ok(result)
    }

    /// Evaluate a single capability name against the item.
    pub fn access_state(
        &self,
        identity: &ActingIdentity,
        item: &ItemRef,
        name: &CapabilityName,
    ) -> Result<AccessState, ResolutionError> {
        let Some(definition) = self.definitions.get(name) else {
            debug!(capability = %name, identity = %identity, "capability undefined, denied");
            return Ok(AccessState::Denied);
        };
        for authority in &definition.authorities {
            if !self.backend.has_authority(&identity.name, authority, item)? {
                debug!(
                    capability = %name,
                    identity = %identity,
                    item = %item,
                    authority,
                    "capability denied, missing authority"
                );
                return Ok(AccessState::Denied);
            }
        }
        debug!(capability = %name, identity = %identity, item = %item, "capability allowed");
        Ok(AccessState::Allowed)
    }

    /// Whether every named capability is granted. Vacuously true for an
    /// empty list; short-circuits on the first denial.
    pub fn all_granted(
        &self,
        identity: &ActingIdentity,
        item: &ItemRef,
        names: &[CapabilityName],
    ) -> Result<bool, ResolutionError> {
        for name in names {
            if !self.access_state(identity, item, name)?.is_allowed() {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Whether at least one of the named capabilities is granted. False for
    /// an empty set; short-circuits on the first grant.
    pub fn any_granted(
        &self,
        identity: &ActingIdentity,
        item: &ItemRef,
        names: &BTreeSet<CapabilityName>,
    ) -> Result<bool, ResolutionError> {
        for name in names {
            if self.access_state(identity, item, name)?.is_allowed() {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rgs_core::{Kind, MemoryStore};

    fn evaluator(store: MemoryStore, definitions: CapabilitySet) -> CapabilityEvaluator {
        CapabilityEvaluator::new(definitions, Arc::new(store))
    }

    fn names(list: &[&str]) -> BTreeSet<CapabilityName> {
        list.iter().map(|n| CapabilityName::new(*n)).collect()
    }

    #[test]
    fn test_one_entry_per_requested_name() {
        let mut store = MemoryStore::new();
        let item = store.insert(Kind::Record);
        let mut defs = CapabilitySet::new();
        defs.define(CapabilityDefinition::new("View", ["ReadRecords"]));
        store.grant("jbloggs", "ReadRecords", item);
        let evaluator = evaluator(store, defs);
        let identity = ActingIdentity::named("jbloggs");

        let result = evaluator
            .evaluate(&identity, &item, &names(&["View", "File", "AddToHold"]))
            .unwrap();
        assert_eq!(result.len(), 3);
        assert_eq!(result[&CapabilityName::new("View")], AccessState::Allowed);
        assert_eq!(result[&CapabilityName::new("File")], AccessState::Denied);
        assert_eq!(result[&CapabilityName::new("AddToHold")], AccessState::Denied);
    }

    #[test]
    fn test_all_listed_authorities_must_hold() {
        let mut store = MemoryStore::new();
        let item = store.insert(Kind::Record);
        let mut defs = CapabilitySet::new();
        defs.define(CapabilityDefinition::new(
            "File",
            ["ReadRecords", "FileRecords"],
        ));
        store.grant("jbloggs", "ReadRecords", item);
        let identity = ActingIdentity::named("jbloggs");

        let partial = evaluator(store.clone(), defs.clone());
        assert_eq!(
            partial.access_state(&identity, &item, &CapabilityName::new("File")).unwrap(),
            AccessState::Denied
        );

        store.grant("jbloggs", "FileRecords", item);
        let full = evaluator(store, defs);
        assert_eq!(
            full.access_state(&identity, &item, &CapabilityName::new("File")).unwrap(),
            AccessState::Allowed
        );
    }

    #[test]
    fn test_empty_authority_list_grants_unconditionally() {
        let mut store = MemoryStore::new();
        let item = store.insert(Kind::Record);
        let mut defs = CapabilitySet::new();
        defs.define(CapabilityDefinition::new("View", Vec::<String>::new()));
        let evaluator = evaluator(store, defs);

        assert_eq!(
            evaluator
                .access_state(&ActingIdentity::named("nobody"), &item, &CapabilityName::new("View"))
                .unwrap(),
            AccessState::Allowed
        );
    }

    #[test]
    fn test_all_granted_is_vacuously_true() {
        let mut store = MemoryStore::new();
        let item = store.insert(Kind::Record);
        let evaluator = evaluator(store, CapabilitySet::new());

        assert!(evaluator
            .all_granted(&ActingIdentity::named("nobody"), &item, &[])
            .unwrap());
    }

    #[test]
    fn test_any_granted_is_false_on_empty_set() {
        let mut store = MemoryStore::new();
        let item = store.insert(Kind::Record);
        let evaluator = evaluator(store, CapabilitySet::new());

        assert!(!evaluator
            .any_granted(&ActingIdentity::named("nobody"), &item, &BTreeSet::new())
            .unwrap());
    }

    #[test]
    fn test_redefinition_replaces_earlier_definition() {
        let mut store = MemoryStore::new();
        let item = store.insert(Kind::Record);
        let mut defs = CapabilitySet::new();
        defs.define(CapabilityDefinition::new("View", ["MissingAuthority"]));
        defs.define(CapabilityDefinition::new("View", Vec::<String>::new()));
        let evaluator = evaluator(store, defs);

        assert_eq!(
            evaluator
                .access_state(&ActingIdentity::named("nobody"), &item, &CapabilityName::new("View"))
                .unwrap(),
            AccessState::Allowed
        );
    }
}

//! # rgs-hold — Hold Membership Resolver
//!
//! Answers hold containment questions: is an item a hold, which holds
//! contain it, and may the caller file into any hold that is relevant to
//! it.
//!
//! ## Design
//!
//! Membership comes in two strengths. *Direct* membership means the hold
//! lists the item itself. *Enclosing* membership additionally counts holds
//! that contain any transitive parent of the item: a record whose folder is
//! held is itself held for every purpose that passes
//! `include_enclosing = true`. Callers choose the strength per query.
//!
//! The resolver is stateless; every query reads the hold and object stores
//! afresh.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::debug;

use rgs_core::{HoldStore, ItemRef, ObjectStore, ResolutionError};

/// Stateless resolver over the host's hold and object stores.
#[derive(Clone)]
pub struct HoldResolver {
    holds: Arc<dyn HoldStore>,
    objects: Arc<dyn ObjectStore>,
}

impl HoldResolver {
    /// Build a resolver over the given stores.
    pub fn new(holds: Arc<dyn HoldStore>, objects: Arc<dyn ObjectStore>) -> Self {
        Self { holds, objects }
    }

    /// Whether the item is itself a hold container.
    pub fn is_hold(&self, item: &ItemRef) -> Result<bool, ResolutionError> {
        self.holds.is_hold(item)
    }

    /// The holds containing the item.
    ///
    /// Direct holds come first in store order; with `include_enclosing`,
    /// holds containing any transitive parent follow in walk order. The
    /// result is de-duplicated and the parent walk guards against cycles.
    pub fn holds_containing(
        &self,
        item: &ItemRef,
        include_enclosing: bool,
    ) -> Result<Vec<ItemRef>, ResolutionError> {
        let mut result = Vec::new();
        let mut found = BTreeSet::new();
        let mut push = |holds: Vec<ItemRef>, result: &mut Vec<ItemRef>| {
            for hold in holds {
                if found.insert(hold) {
                    result.push(hold);
                }
            }
        };

        push(self.holds.holds_directly_containing(item)?, &mut result);

        if include_enclosing {
            let mut queue: Vec<ItemRef> = self.objects.parents(item)?;
            let mut visited = BTreeSet::from([*item]);
            while let Some(ancestor) = queue.pop() {
                if !visited.insert(ancestor) {
                    continue;
                }
                push(self.holds.holds_directly_containing(&ancestor)?, &mut result);
                queue.extend(self.objects.parents(&ancestor)?);
            }
        }

        debug!(item = %item, include_enclosing, holds = result.len(), "hold containment");
        Ok(result)
    }

    /// Whether the item is contained in no hold at all, enclosing
    /// membership included. Disposition progress requires this.
    pub fn held_by_none(&self, item: &ItemRef) -> Result<bool, ResolutionError> {
        Ok(self.holds_containing(item, true)?.is_empty())
    }

    /// Whether the caller may file into a hold relevant to the item: the
    /// item itself is a hold the caller may file into, or some hold
    /// containing the item grants filing. Short-circuits on the first
    /// grant.
    pub fn can_file_into_any_holding<F>(
        &self,
        item: &ItemRef,
        include_enclosing: bool,
        has_filing_permission: F,
    ) -> Result<bool, ResolutionError>
    where
        F: Fn(&ItemRef) -> bool,
    {
        if self.is_hold(item)? && has_filing_permission(item) {
            return Ok(true);
        }
        for hold in self.holds_containing(item, include_enclosing)? {
            if has_filing_permission(&hold) {
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

    fn resolver(store: MemoryStore) -> HoldResolver {
        let store = Arc::new(store);
        HoldResolver::new(store.clone(), store)
    }

    #[test]
    fn test_direct_membership_only() {
        let mut store = MemoryStore::new();
        let hold = store.insert(Kind::Hold);
        let folder = store.insert(Kind::Folder);
        let record = store.insert(Kind::Record);
        store.set_parent(record, folder);
        store.add_hold_member(hold, folder);
        let resolver = resolver(store);

        assert_eq!(resolver.holds_containing(&record, false).unwrap(), vec![]);
        assert_eq!(resolver.holds_containing(&record, true).unwrap(), vec![hold]);
        assert_eq!(resolver.holds_containing(&folder, false).unwrap(), vec![hold]);
    }

    #[test]
    fn test_enclosing_membership_deduplicates() {
        let mut store = MemoryStore::new();
        let hold = store.insert(Kind::Hold);
        let folder = store.insert(Kind::Folder);
        let record = store.insert(Kind::Record);
        store.set_parent(record, folder);
        store.add_hold_member(hold, record);
        store.add_hold_member(hold, folder);
        let resolver = resolver(store);

        assert_eq!(resolver.holds_containing(&record, true).unwrap(), vec![hold]);
    }

    #[test]
    fn test_held_by_none() {
        let mut store = MemoryStore::new();
        let hold = store.insert(Kind::Hold);
        let free = store.insert(Kind::Record);
        let held = store.insert(Kind::Record);
        store.add_hold_member(hold, held);
        let resolver = resolver(store);

        assert!(resolver.held_by_none(&free).unwrap());
        assert!(!resolver.held_by_none(&held).unwrap());
    }

    #[test]
    fn test_filing_into_the_hold_itself() {
        let mut store = MemoryStore::new();
        let hold = store.insert(Kind::Hold);
        let resolver = resolver(store);

        assert!(resolver
            .can_file_into_any_holding(&hold, false, |candidate| candidate == &hold)
            .unwrap());
        assert!(!resolver
            .can_file_into_any_holding(&hold, false, |_| false)
            .unwrap());
    }

    #[test]
    fn test_filing_via_containing_hold() {
        let mut store = MemoryStore::new();
        let closed = store.insert(Kind::Hold);
        let open = store.insert(Kind::Hold);
        let record = store.insert(Kind::Record);
        store.add_hold_member(closed, record);
        store.add_hold_member(open, record);
        let resolver = resolver(store);

        assert!(resolver
            .can_file_into_any_holding(&record, false, |candidate| candidate == &open)
            .unwrap());
        assert!(!resolver
            .can_file_into_any_holding(&record, false, |_| false)
            .unwrap());
    }
}

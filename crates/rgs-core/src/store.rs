//! # External Store Traits
//!
//! The narrow seams through which the governance engine reads the host
//! system. Four collaborators, one trait each:
//!
//! - [`ObjectStore`] — the object graph and attribute store.
//! - [`ScheduleStore`] — retention schedules and per-item progress.
//! - [`HoldStore`] — hold containment facts.
//! - [`AuthorityBackend`] — raw per-identity permission checks.
//!
//! ## Design
//!
//! Every method is a read; the engine never mutates the host through these
//! traits. All traits are object-safe and `Send + Sync` so resolvers can
//! hold them as `Arc<dyn ...>` and be called from any thread. A failed read
//! is a [`ResolutionError`] and always propagates; there are no silent
//! defaults.

use std::collections::{BTreeSet, VecDeque};

use crate::attrs::{AttrKey, AttrValue, CategoryId};
use crate::error::ResolutionError;
use crate::item::ItemRef;
use crate::kind::Kind;
use crate::schedule::RetentionSchedule;

/// Read access to the host's object graph and attribute store.
pub trait ObjectStore: Send + Sync {
    /// Whether the item exists.
    fn exists(&self, item: &ItemRef) -> Result<bool, ResolutionError>;

    /// The structural kind the item currently resolves to.
    fn kind_of(&self, item: &ItemRef) -> Result<Kind, ResolutionError>;

    /// The current value of a single attribute, if set.
    fn attribute(&self, item: &ItemRef, key: &AttrKey) -> Result<Option<AttrValue>, ResolutionError>;

    /// Whether the item currently carries the category.
    fn has_category(&self, item: &ItemRef, category: &CategoryId) -> Result<bool, ResolutionError>;

    /// The item's parent containers, nearest first.
    fn parents(&self, item: &ItemRef) -> Result<Vec<ItemRef>, ResolutionError>;

    /// The governing top-level container for the item, found by walking the
    /// parent chain (the item itself counts if it is a file plan).
    ///
    /// Returns `Ok(None)` when the walk exhausts without reaching a
    /// [`Kind::FilePlan`] node. The walk is breadth-first and guards
    /// against parent cycles.
    fn file_plan_for(&self, item: &ItemRef) -> Result<Option<ItemRef>, ResolutionError> {
        let mut queue = VecDeque::from([*item]);
        let mut seen = BTreeSet::new();
        while let Some(current) = queue.pop_front() {
            if !seen.insert(current) {
                continue;
            }
            if self.kind_of(&current)? == Kind::FilePlan {
                return Ok(Some(current));
            }
            queue.extend(self.parents(&current)?);
        }
        Ok(None)
    }
}

/// Read access to the host's retention schedule store.
pub trait ScheduleStore: Send + Sync {
    /// The schedule governing the item, if any.
    fn schedule_for(&self, item: &ItemRef) -> Result<Option<RetentionSchedule>, ResolutionError>;

    /// Names of the disposition steps already completed against the item,
    /// in completion order.
    fn completed_steps(&self, item: &ItemRef) -> Result<Vec<String>, ResolutionError>;

    /// The disposition events recorded against the item.
    fn occurred_events(&self, item: &ItemRef) -> Result<BTreeSet<String>, ResolutionError>;
}

/// Read access to the host's hold containment facts.
pub trait HoldStore: Send + Sync {
    /// Whether the item is itself a hold container.
    fn is_hold(&self, item: &ItemRef) -> Result<bool, ResolutionError>;

    /// The holds that directly contain the item, in a stable order.
    fn holds_directly_containing(&self, item: &ItemRef) -> Result<Vec<ItemRef>, ResolutionError>;
}

/// Raw permission checks supplied by the host's identity backend.
///
/// The capability evaluator composes these low-level checks into named
/// capabilities; this trait knows nothing about capabilities.
pub trait AuthorityBackend: Send + Sync {
    /// Whether `identity` holds `authority` on `item`.
    fn has_authority(
        &self,
        identity: &str,
        authority: &str,
        item: &ItemRef,
    ) -> Result<bool, ResolutionError>;
}

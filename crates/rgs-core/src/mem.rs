//! # In-Memory Reference Store
//!
//! A `BTreeMap`-backed implementation of all four store traits, used by the
//! test suites across the workspace and by embedding hosts that want a
//! self-contained store.
//!
//! ## Design
//!
//! Setup methods take `&mut self`; all trait reads take `&self`. A host
//! populates the store during initialization and then shares it immutably
//! (typically as `Arc<MemoryStore>`), so steady-state reads need no
//! locking. Unknown items produce [`ResolutionError::NotFound`] rather than
//! empty answers, matching the propagation policy of the real collaborators.

use std::collections::{BTreeMap, BTreeSet};

use crate::attrs::{AttrKey, AttrMap, AttrValue, CategoryId};
use crate::error::ResolutionError;
use crate::item::ItemRef;
use crate::kind::Kind;
use crate::schedule::RetentionSchedule;
use crate::store::{AuthorityBackend, HoldStore, ObjectStore, ScheduleStore};

#[derive(Debug, Clone, Default)]
struct ItemState {
    kind: Option<Kind>,
    parent: Option<ItemRef>,
    attributes: AttrMap,
    categories: BTreeSet<CategoryId>,
    schedule: Option<RetentionSchedule>,
    completed_steps: Vec<String>,
    occurred_events: BTreeSet<String>,
    held_by: Vec<ItemRef>,
}

/// In-memory implementation of [`ObjectStore`], [`ScheduleStore`],
/// [`HoldStore`], and [`AuthorityBackend`].
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: BTreeMap<ItemRef, ItemState>,
    /// (identity, authority, item) triples that hold.
    grants: BTreeSet<(String, String, ItemRef)>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an item of the given kind and return its reference.
    pub fn insert(&mut self, kind: Kind) -> ItemRef {
        let item = ItemRef::new();
        self.items.entry(item).or_default().kind = Some(kind);
        item
    }

    /// Set the item's parent container.
    pub fn set_parent(&mut self, item: ItemRef, parent: ItemRef) {
        self.items.entry(item).or_default().parent = Some(parent);
    }

    /// Set a single attribute value.
    pub fn set_attribute(&mut self, item: ItemRef, key: AttrKey, value: AttrValue) {
        self.items.entry(item).or_default().attributes.insert(key, value);
    }

    /// Apply a category to the item.
    pub fn add_category(&mut self, item: ItemRef, category: CategoryId) {
        self.items.entry(item).or_default().categories.insert(category);
    }

    /// Attach the schedule that governs the item.
    ///
    /// In a real hierarchy the schedule hangs off an ancestor category;
    /// reads walk the parent chain, so attaching at the category level
    /// governs everything filed beneath it.
    pub fn set_schedule(&mut self, item: ItemRef, schedule: RetentionSchedule) {
        self.items.entry(item).or_default().schedule = Some(schedule);
    }

    /// Record that a disposition step has completed against the item.
    pub fn complete_step(&mut self, item: ItemRef, step_name: impl Into<String>) {
        self.items
            .entry(item)
            .or_default()
            .completed_steps
            .push(step_name.into());
    }

    /// Record a disposition event against the item.
    pub fn record_event(&mut self, item: ItemRef, event: impl Into<String>) {
        self.items
            .entry(item)
            .or_default()
            .occurred_events
            .insert(event.into());
    }

    /// Add the item to a hold (direct membership).
    pub fn add_hold_member(&mut self, hold: ItemRef, member: ItemRef) {
        let held_by = &mut self.items.entry(member).or_default().held_by;
        if !held_by.contains(&hold) {
            held_by.push(hold);
        }
    }

    /// Grant a raw authority to an identity on an item.
    pub fn grant(&mut self, identity: impl Into<String>, authority: impl Into<String>, item: ItemRef) {
        self.grants.insert((identity.into(), authority.into(), item));
    }

    fn state(&self, item: &ItemRef) -> Result<&ItemState, ResolutionError> {
        self.items
            .get(item)
            .ok_or(ResolutionError::NotFound { item: *item })
    }
}

impl ObjectStore for MemoryStore {
    fn exists(&self, item: &ItemRef) -> Result<bool, ResolutionError> {
        Ok(self.items.contains_key(item))
    }

    fn kind_of(&self, item: &ItemRef) -> Result<Kind, ResolutionError> {
        self.state(item)?
            .kind
            .ok_or(ResolutionError::NotFound { item: *item })
    }

    fn attribute(&self, item: &ItemRef, key: &AttrKey) -> Result<Option<AttrValue>, ResolutionError> {
        Ok(self.state(item)?.attributes.get(key).cloned())
    }

    fn has_category(&self, item: &ItemRef, category: &CategoryId) -> Result<bool, ResolutionError> {
        Ok(self.state(item)?.categories.contains(category))
    }

    fn parents(&self, item: &ItemRef) -> Result<Vec<ItemRef>, ResolutionError> {
        Ok(self.state(item)?.parent.into_iter().collect())
    }
}

impl ScheduleStore for MemoryStore {
    fn schedule_for(&self, item: &ItemRef) -> Result<Option<RetentionSchedule>, ResolutionError> {
        // Walk up the hierarchy to the nearest governing schedule.
        let mut current = Some(*item);
        let mut seen = BTreeSet::new();
        while let Some(node) = current {
            if !seen.insert(node) {
                break;
            }
            let state = self.state(&node)?;
            if let Some(schedule) = &state.schedule {
                return Ok(Some(schedule.clone()));
            }
            current = state.parent;
        }
        Ok(None)
    }

    fn completed_steps(&self, item: &ItemRef) -> Result<Vec<String>, ResolutionError> {
        Ok(self.state(item)?.completed_steps.clone())
    }

    fn occurred_events(&self, item: &ItemRef) -> Result<BTreeSet<String>, ResolutionError> {
        Ok(self.state(item)?.occurred_events.clone())
    }
}

impl HoldStore for MemoryStore {
    fn is_hold(&self, item: &ItemRef) -> Result<bool, ResolutionError> {
        Ok(self.state(item)?.kind == Some(Kind::Hold))
    }

    fn holds_directly_containing(&self, item: &ItemRef) -> Result<Vec<ItemRef>, ResolutionError> {
        Ok(self.state(item)?.held_by.clone())
    }
}

impl AuthorityBackend for MemoryStore {
    fn has_authority(
        &self,
        identity: &str,
        authority: &str,
        item: &ItemRef,
    ) -> Result<bool, ResolutionError> {
        Ok(self
            .grants
            .contains(&(identity.to_string(), authority.to_string(), *item)))
    }
}

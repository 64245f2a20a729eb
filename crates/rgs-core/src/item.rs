//! # Item Identity Newtypes
//!
//! Newtype wrappers for the identifiers that cross the boundary between the
//! governance engine and the host's object graph. These prevent accidental
//! identifier confusion: you cannot pass a `ScheduleId` where an `ItemRef`
//! is expected.
//!
//! An `ItemRef` is a foreign key into the host's store. The engine never
//! creates or destroys the items it points at; it only reads them and gates
//! writes to them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque reference to a managed content item (record, folder, category,
/// file plan, hold, transfer).
///
/// Comparable, hashable, and ordered so it can key `BTreeMap`s and appear in
/// deterministic result lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemRef(pub Uuid);

/// Unique identifier for a retention schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ScheduleId(pub Uuid);

impl ItemRef {
    /// Generate a new random item reference.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ItemRef {
    fn default() -> Self {
        Self::new()
    }
}

impl ScheduleId {
    /// Generate a new random schedule identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ScheduleId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ItemRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "item:{}", self.0)
    }
}

impl std::fmt::Display for ScheduleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "schedule:{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_ref_display_prefix() {
        let item = ItemRef::new();
        assert!(item.to_string().starts_with("item:"));
    }

    #[test]
    fn test_item_refs_are_distinct() {
        assert_ne!(ItemRef::new(), ItemRef::new());
    }

    #[test]
    fn test_serde_round_trip() {
        let item = ItemRef::new();
        let json = serde_json::to_string(&item).unwrap();
        let back: ItemRef = serde_json::from_str(&json).unwrap();
        assert_eq!(item, back);
    }
}

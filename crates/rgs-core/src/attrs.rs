//! # Attribute and Category Identifiers
//!
//! String newtypes for the mutable surface of a managed item: attribute
//! keys, category identifiers, and the `ArtifactId` that unifies them as
//! the key space of the protected-artifact registry.
//!
//! Attribute values are `serde_json::Value` so the engine stays agnostic to
//! the host's property model. Equality of attribute values is structural
//! JSON equality.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The key of a single item attribute.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AttrKey(pub String);

/// Identifier of a category that can be applied to or removed from an item.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CategoryId(pub String);

/// An attribute value as supplied by the host store.
pub type AttrValue = serde_json::Value;

/// A snapshot of an item's attributes, ordered by key for deterministic
/// iteration.
pub type AttrMap = BTreeMap<AttrKey, AttrValue>;

/// Identifies a write-protected artifact: either a single attribute or a
/// single category.
///
/// This is the key of the protected-artifact registry. Registration is an
/// upsert on this identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactId {
    /// A protected attribute, keyed by attribute name.
    Attribute(AttrKey),
    /// A protected category, keyed by category identifier.
    Category(CategoryId),
}

impl AttrKey {
    /// Construct an attribute key from anything string-like.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Access the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl CategoryId {
    /// Construct a category identifier from anything string-like.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Access the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AttrKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for CategoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Attribute(key) => write!(f, "attribute:{key}"),
            Self::Category(id) => write!(f, "category:{id}"),
        }
    }
}

impl From<AttrKey> for ArtifactId {
    fn from(key: AttrKey) -> Self {
        Self::Attribute(key)
    }
}

impl From<CategoryId> for ArtifactId {
    fn from(id: CategoryId) -> Self {
        Self::Category(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_id_display_distinguishes_namespaces() {
        let attr: ArtifactId = AttrKey::new("title").into();
        let cat: ArtifactId = CategoryId::new("title").into();
        assert_ne!(attr, cat);
        assert_eq!(attr.to_string(), "attribute:title");
        assert_eq!(cat.to_string(), "category:title");
    }

    #[test]
    fn test_attr_map_iterates_in_key_order() {
        let mut map = AttrMap::new();
        map.insert(AttrKey::new("b"), serde_json::json!(2));
        map.insert(AttrKey::new("a"), serde_json::json!(1));
        let keys: Vec<_> = map.keys().map(AttrKey::as_str).collect();
        assert_eq!(keys, ["a", "b"]);
    }
}

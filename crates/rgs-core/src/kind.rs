//! # Item Kind — Single Source of Truth
//!
//! Defines the `Kind` enum describing what structural category a managed
//! item currently resolves to. This is the ONE definition used across the
//! stack. Every `match` on `Kind` must be exhaustive; adding a kind forces
//! every consumer to handle it at compile time.
//!
//! A kind is derived on demand from the host's object store via
//! [`ObjectStore::kind_of`](crate::store::ObjectStore::kind_of). It is never
//! cached across calls by this crate.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// The structural category of a managed item.
///
/// Used for coarse filtering before fine-grained capability and condition
/// checks: resolving a kind is a single store read, far cheaper than a
/// capability evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    /// The top-level governing container of a records hierarchy.
    FilePlan,
    /// A record category; carries classification and retention schedules.
    Category,
    /// A folder that files records.
    Folder,
    /// A declared record.
    Record,
    /// A hold container; membership blocks disposition.
    Hold,
    /// A transfer container for items leaving the hierarchy.
    Transfer,
    /// The container for records not yet filed into the hierarchy.
    Unfiled,
}

impl Kind {
    /// Whether items of this kind can themselves contain other items.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            Self::FilePlan | Self::Category | Self::Folder | Self::Hold | Self::Transfer | Self::Unfiled
        )
    }

    /// Canonical lowercase name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FilePlan => "file_plan",
            Self::Category => "category",
            Self::Folder => "folder",
            Self::Record => "record",
            Self::Hold => "hold",
            Self::Transfer => "transfer",
            Self::Unfiled => "unfiled",
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown kind name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown item kind: {0:?}")]
pub struct UnknownKind(pub String);

impl FromStr for Kind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "file_plan" => Ok(Self::FilePlan),
            "category" => Ok(Self::Category),
            "folder" => Ok(Self::Folder),
            "record" => Ok(Self::Record),
            "hold" => Ok(Self::Hold),
            "transfer" => Ok(Self::Transfer),
            "unfiled" => Ok(Self::Unfiled),
            other => Err(UnknownKind(other.to_string())),
        }
    }
}

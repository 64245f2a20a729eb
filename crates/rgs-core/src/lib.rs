//! # rgs-core — Foundational Types for the Records Governance Stack
//!
//! This crate is the bedrock of the Records Governance Stack. It defines the
//! primitives every other crate builds on: opaque item references, the closed
//! `Kind` taxonomy, attribute and category identifiers, acting identities
//! with an explicit trust flag, retention schedule primitives, the error
//! taxonomy, and the narrow traits through which the engine reads the host's
//! object graph, schedule store, hold store, and permission backend.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `ItemRef`, `ScheduleId`,
//!    `AttrKey`, and `CategoryId` live in their own namespaces. No bare
//!    strings or UUIDs cross a crate boundary.
//!
//! 2. **Single `Kind` enum.** One closed definition of what a managed item
//!    can be. Every `match` on `Kind` is exhaustive; adding a kind forces
//!    every consumer to handle it at compile time.
//!
//! 3. **Explicit trust.** `ActingIdentity` carries its `trusted` flag as
//!    plain data. There is no ambient "run as system" state to consult.
//!
//! 4. **The engine never owns the object graph.** All reads flow through the
//!    `ObjectStore`, `ScheduleStore`, `HoldStore`, and `AuthorityBackend`
//!    traits; the host decides what backs them. `MemoryStore` is the
//!    reference implementation used by tests and embedding hosts.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `rgs-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public data types derive `Debug`, `Clone`, `Serialize`, `Deserialize`.

pub mod attrs;
pub mod error;
pub mod identity;
pub mod item;
pub mod kind;
pub mod mem;
pub mod schedule;
pub mod store;

// Re-export primary types for ergonomic imports.
pub use attrs::{ArtifactId, AttrKey, AttrMap, AttrValue, CategoryId};
pub use error::{AccessDenied, ConfigurationError, GovernanceError, ResolutionError};
pub use identity::ActingIdentity;
pub use item::{ItemRef, ScheduleId};
pub use kind::Kind;
pub use mem::MemoryStore;
pub use schedule::{DispositionStep, EligibilityCriteria, RetentionSchedule, ScheduleLevel};
pub use store::{AuthorityBackend, HoldStore, ObjectStore, ScheduleStore};

//! # rgs-gate — Conditions and the Action Gate
//!
//! Decides whether an action or indicator is exposed for an item. The
//! decision pipeline runs cheap filters first: the item's kind, then the
//! configured capabilities, then the action's own condition tree, which may
//! recurse into the retention and hold resolvers.
//!
//! ## Design
//!
//! Conditions are a closed tagged enum dispatched by exhaustive `match`,
//! not an open hierarchy: adding a condition kind is a compile-time change
//! every consumer sees. Composite conditions always recompute their
//! children in full; there is no memoization layer anywhere in condition
//! evaluation, so a composite can never observe a stale sub-answer.

mod condition;
mod gate;

pub use condition::{Condition, ConditionContext, LeafCondition};
pub use gate::{ActionDescriptor, ActionGate};

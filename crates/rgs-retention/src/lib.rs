//! # rgs-retention — Retention State Resolver
//!
//! Answers the retention questions the action gate and the condition
//! predicates ask about an item: which disposition step is next, which step
//! completed last, whether a named step occurs at a given position, and
//! whether the next step is currently eligible to run.
//!
//! ## Design
//!
//! The resolver is stateless. Every query reads the schedule store and the
//! object store afresh; nothing is cached across calls, so concurrent
//! readers always see a consistent view of whatever the host's transaction
//! exposes. Per-item progress is derived from two store facts: the ordered
//! list of completed step names and the set of recorded events.
//!
//! An item with no governing schedule answers `false`/`None` to every
//! query. Store read failures propagate as
//! [`ResolutionError`](rgs_core::ResolutionError); they are never folded
//! into a default answer.

mod resolver;

pub use resolver::{RetentionResolver, StepPosition};

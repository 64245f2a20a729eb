//! # Condition Predicates and Combinators
//!
//! A `Condition` is a pure boolean test over an item reference and ambient
//! context. Evaluation performs reads only; it never mutates the host
//! store. Leaves are named closures; structural variants recurse into the
//! retention and hold resolvers through the [`ConditionContext`].
//!
//! Combinator semantics:
//!
//! - `AnyOf([])` is `false`: no condition implies nothing is satisfied.
//! - `AllOf([])` is `true`.
//! - `AnyOf`/`AllOf` short-circuit in declaration order. Conditions are
//!   pure, so the order affects cost only, never the answer.
//! - Composites recompute their children on every evaluation. No caching.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use rgs_core::{ItemRef, Kind, ObjectStore, ResolutionError};
use rgs_hold::HoldResolver;
use rgs_retention::{RetentionResolver, StepPosition};

/// Everything a condition may consult during evaluation.
#[derive(Clone)]
pub struct ConditionContext {
    /// Retention state resolver.
    pub retention: RetentionResolver,
    /// Hold membership resolver.
    pub holds: HoldResolver,
    /// The host's object store.
    pub objects: Arc<dyn ObjectStore>,
    /// The instant "now" for eligibility checks, fixed per evaluation so a
    /// condition tree sees one consistent clock.
    pub now: DateTime<Utc>,
}

impl ConditionContext {
    /// Build a context over the given resolvers, pinned to the current
    /// wall clock.
    pub fn new(retention: RetentionResolver, holds: HoldResolver, objects: Arc<dyn ObjectStore>) -> Self {
        Self::at(retention, holds, objects, Utc::now())
    }

    /// Build a context pinned to an explicit instant.
    pub fn at(
        retention: RetentionResolver,
        holds: HoldResolver,
        objects: Arc<dyn ObjectStore>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            retention,
            holds,
            objects,
            now,
        }
    }
}

type LeafFn = dyn Fn(&ItemRef, &ConditionContext) -> Result<bool, ResolutionError> + Send + Sync;

/// A named leaf predicate.
#[derive(Clone)]
pub struct LeafCondition {
    name: String,
    test: Arc<LeafFn>,
}

impl LeafCondition {
    /// Wrap a closure as a named leaf.
    pub fn new(
        name: impl Into<String>,
        test: impl Fn(&ItemRef, &ConditionContext) -> Result<bool, ResolutionError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            test: Arc::new(test),
        }
    }

    /// The leaf's diagnostic name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for LeafCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("LeafCondition").field(&self.name).finish()
    }
}

/// A composable boolean condition over an item.
#[derive(Debug, Clone)]
pub enum Condition {
    /// A named closure.
    Leaf(LeafCondition),
    /// True iff at least one child is true. Empty is false.
    AnyOf(Vec<Condition>),
    /// True iff every child is true. Empty is true.
    AllOf(Vec<Condition>),
    /// Logical negation.
    Not(Box<Condition>),
    /// A step with the given name occurs at the given schedule position.
    SchedulePosition {
        /// The step name to look for (exact, case-sensitive).
        step_name: String,
        /// Where in the schedule to look.
        position: StepPosition,
    },
    /// A step with the given name could be scheduled for the item.
    MayBeScheduled {
        /// The step name to look for.
        step_name: String,
    },
    /// The item participates in a retention schedule.
    Disposable,
    /// The item's next disposition step is eligible at the context clock.
    EligibleNow,
    /// The item is contained in at least one hold.
    HeldBy {
        /// Whether enclosing-container membership counts.
        include_enclosing: bool,
    },
    /// The item currently resolves to the given kind.
    IsKind(Kind),
}

impl Condition {
    /// A named leaf condition.
    pub fn leaf(
        name: impl Into<String>,
        test: impl Fn(&ItemRef, &ConditionContext) -> Result<bool, ResolutionError> + Send + Sync + 'static,
    ) -> Self {
        Self::Leaf(LeafCondition::new(name, test))
    }

    /// A leaf that always evaluates to the given value.
    pub fn constant(value: bool) -> Self {
        Self::leaf(if value { "always" } else { "never" }, move |_, _| Ok(value))
    }

    /// Disjunction of the given conditions.
    pub fn any_of(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Self::AnyOf(conditions.into_iter().collect())
    }

    /// Conjunction of the given conditions.
    pub fn all_of(conditions: impl IntoIterator<Item = Condition>) -> Self {
        Self::AllOf(conditions.into_iter().collect())
    }

    /// Negation of the given condition.
    pub fn not(condition: Condition) -> Self {
        Self::Not(Box::new(condition))
    }

    /// Evaluate the condition for an item.
    ///
    /// Total for well-formed trees; a failed store read propagates as
    /// [`ResolutionError`].
    pub fn evaluate(&self, item: &ItemRef, ctx: &ConditionContext) -> Result<bool, ResolutionError> {
        match self {
            Self::Leaf(leaf) => (leaf.test)(item, ctx),
            Self::AnyOf(children) => {
                for child in children {
                    if child.evaluate(item, ctx)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            Self::AllOf(children) => {
                for child in children {
                    if !child.evaluate(item, ctx)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Self::Not(child) => Ok(!child.evaluate(item, ctx)?),
            Self::SchedulePosition { step_name, position } => {
                ctx.retention.has_step_named(item, step_name, *position)
            }
            Self::MayBeScheduled { step_name } => ctx.retention.may_be_scheduled(item, step_name),
            Self::Disposable => ctx.retention.is_disposable(item),
            Self::EligibleNow => ctx.retention.is_eligible_at(item, ctx.now),
            Self::HeldBy { include_enclosing } => {
                Ok(!ctx.holds.holds_containing(item, *include_enclosing)?.is_empty())
            }
            Self::IsKind(kind) => Ok(ctx.objects.kind_of(item)? == *kind),
        }
    }
}

//! # Condition-Based Action Gate
//!
//! Decides whether a named action or indicator is exposed for an item. The
//! pipeline is three stages, cheapest first, each able to end the decision:
//!
//! 1. **Kind filter** — if a kind restriction is configured and the item's
//!    kind is not in it, the answer is `false` and nothing else runs.
//!    Kind resolution is one store read; capabilities and conditions are
//!    skipped deliberately, not merely logically.
//! 2. **Capability filter** — if capability names are configured, all must
//!    be granted; otherwise the answer is `false` and the condition never
//!    runs.
//! 3. **Condition** — the action's own condition tree, if any.
//!
//! An unconfigured stage passes unconditionally: absence of configuration
//! means "unrestricted", not "misconfigured". A single item is typically
//! evaluated against dozens of descriptors per request, so the stage order
//! bounds worst-case latency under that fan-out.

use std::collections::BTreeSet;

use tracing::debug;

use rgs_capability::{CapabilityEvaluator, CapabilityName};
use rgs_core::{ActingIdentity, ItemRef, Kind, ResolutionError};

use crate::condition::{Condition, ConditionContext};

/// Declarative description of one action or indicator.
#[derive(Debug, Clone)]
pub struct ActionDescriptor {
    /// The action's stable name, for diagnostics.
    pub name: String,
    /// Kinds the action applies to. Empty means every kind.
    pub kinds: BTreeSet<Kind>,
    /// Capabilities that must all be granted. Empty means none required.
    pub capabilities: Vec<CapabilityName>,
    /// The action's own condition. `None` means unconditional.
    pub condition: Option<Condition>,
}

impl ActionDescriptor {
    /// An unrestricted descriptor with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kinds: BTreeSet::new(),
            capabilities: Vec::new(),
            condition: None,
        }
    }

    /// Restrict the action to the given kinds.
    pub fn for_kinds(mut self, kinds: impl IntoIterator<Item = Kind>) -> Self {
        self.kinds = kinds.into_iter().collect();
        self
    }

    /// Require the given capabilities.
    pub fn requiring(mut self, capabilities: impl IntoIterator<Item = CapabilityName>) -> Self {
        self.capabilities = capabilities.into_iter().collect();
        self
    }

    /// Gate the action on a condition.
    pub fn when(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }
}

/// Evaluates action descriptors against items.
#[derive(Clone)]
pub struct ActionGate {
    evaluator: CapabilityEvaluator,
}

impl ActionGate {
    /// Build a gate over a capability evaluator.
    pub fn new(evaluator: CapabilityEvaluator) -> Self {
        Self { evaluator }
    }

    /// Whether the described action is exposed for the item.
    ///
    /// "Not exposed" is a plain `false`, never an error; errors are
    /// reserved for failed store reads.
    pub fn is_exposed(
        &self,
        descriptor: &ActionDescriptor,
        identity: &ActingIdentity,
        item: &ItemRef,
        ctx: &ConditionContext,
    ) -> Result<bool, ResolutionError> {
        if !descriptor.kinds.is_empty() {
            let kind = ctx.objects.kind_of(item)?;
            if !descriptor.kinds.contains(&kind) {
                debug!(action = %descriptor.name, item = %item, %kind, "kind filter rejected");
                return Ok(false);
            }
        }

        if !descriptor.capabilities.is_empty()
            && !self
                .evaluator
                .all_granted(identity, item, &descriptor.capabilities)?
        {
            debug!(action = %descriptor.name, item = %item, identity = %identity, "capability filter rejected");
            return Ok(false);
        }

        match &descriptor.condition {
            Some(condition) => condition.evaluate(item, ctx),
            None => Ok(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use rgs_capability::{CapabilityDefinition, CapabilitySet};
    use rgs_core::MemoryStore;
    use rgs_hold::HoldResolver;
    use rgs_retention::RetentionResolver;

    struct Fixture {
        ctx: ConditionContext,
        gate: ActionGate,
        record: ItemRef,
        folder: ItemRef,
    }

    fn fixture(grants: &[(&str, &str, usize)]) -> Fixture {
        // grants: (identity, authority, 0 = record / 1 = folder)
        let mut store = MemoryStore::new();
        let record = store.insert(Kind::Record);
        let folder = store.insert(Kind::Folder);
        for (identity, authority, target) in grants {
            let item = if *target == 0 { record } else { folder };
            store.grant(*identity, *authority, item);
        }
        let mut defs = CapabilitySet::new();
        defs.define(CapabilityDefinition::new("View", ["ReadRecords"]));
        defs.define(CapabilityDefinition::new("File", ["FileRecords"]));

        let store = Arc::new(store);
        let ctx = ConditionContext::new(
            RetentionResolver::new(store.clone(), store.clone()),
            HoldResolver::new(store.clone(), store.clone()),
            store.clone(),
        );
        let gate = ActionGate::new(CapabilityEvaluator::new(defs, store));
        Fixture {
            ctx,
            gate,
            record,
            folder,
        }
    }

    fn counting_condition() -> (Condition, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let condition = Condition::leaf("counting", move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(true)
        });
        (condition, calls)
    }

    #[test]
    fn test_kind_filter_skips_condition_entirely() {
        let f = fixture(&[]);
        let (condition, calls) = counting_condition();
        let action = ActionDescriptor::new("destroy")
            .for_kinds([Kind::Folder])
            .when(condition);

        let exposed = f
            .gate
            .is_exposed(&action, &ActingIdentity::named("jbloggs"), &f.record, &f.ctx)
            .unwrap();
        assert!(!exposed);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_capability_filter_skips_condition() {
        let f = fixture(&[]);
        let (condition, calls) = counting_condition();
        let action = ActionDescriptor::new("view-details")
            .requiring([CapabilityName::new("View")])
            .when(condition);

        let exposed = f
            .gate
            .is_exposed(&action, &ActingIdentity::named("jbloggs"), &f.record, &f.ctx)
            .unwrap();
        assert!(!exposed);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_all_stages_pass() {
        let f = fixture(&[("jbloggs", "ReadRecords", 0)]);
        let action = ActionDescriptor::new("view-details")
            .for_kinds([Kind::Record])
            .requiring([CapabilityName::new("View")])
            .when(Condition::constant(true));

        assert!(f
            .gate
            .is_exposed(&action, &ActingIdentity::named("jbloggs"), &f.record, &f.ctx)
            .unwrap());
    }

    #[test]
    fn test_unconfigured_stages_pass_unconditionally() {
        let f = fixture(&[]);
        let action = ActionDescriptor::new("open");

        assert!(f
            .gate
            .is_exposed(&action, &ActingIdentity::named("nobody"), &f.record, &f.ctx)
            .unwrap());
        assert!(f
            .gate
            .is_exposed(&action, &ActingIdentity::named("nobody"), &f.folder, &f.ctx)
            .unwrap());
    }

    #[test]
    fn test_condition_decides_when_filters_pass() {
        let f = fixture(&[]);
        let action = ActionDescriptor::new("never-shown").when(Condition::constant(false));

        assert!(!f
            .gate
            .is_exposed(&action, &ActingIdentity::named("nobody"), &f.record, &f.ctx)
            .unwrap());
    }

    #[test]
    fn test_kind_set_with_matching_member_proceeds() {
        let f = fixture(&[("jbloggs", "FileRecords", 1)]);
        let action = ActionDescriptor::new("file-into")
            .for_kinds([Kind::Folder, Kind::Category])
            .requiring([CapabilityName::new("File")]);

        assert!(f
            .gate
            .is_exposed(&action, &ActingIdentity::named("jbloggs"), &f.folder, &f.ctx)
            .unwrap());
        assert!(!f
            .gate
            .is_exposed(&action, &ActingIdentity::named("asmith"), &f.folder, &f.ctx)
            .unwrap());
    }
}

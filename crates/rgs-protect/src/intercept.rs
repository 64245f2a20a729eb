//! # Mutation Interceptor
//!
//! Lifecycle hooks invoked synchronously on every attribute or category
//! mutation attempt. The hooks run inside the caller's unit of work,
//! before the mutation is applied; a veto surfaces as an error and the
//! mutation must not proceed. The interceptor prevents writes, it never
//! rolls them back.
//!
//! ## Allow rules, in order
//!
//! 1. Interception globally disabled (maintenance/bulk-migration windows).
//! 2. No acting identity, or the trusted system identity.
//! 3. The target attribute or category is not registered as protected.
//! 4. For attributes only: the attribute had no prior value. First-time
//!    population of a protected attribute is never gated, whatever the
//!    identity's capabilities.
//! 5. For attributes only: the before and after values are equal.
//!
//! Anything else requires at least one of the artifact's capabilities to
//! evaluate `Allowed` for the item, or the write fails with `AccessDenied`.
//! Attribute checks stop at the first failing key; the error reports that
//! key only.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use rgs_capability::CapabilityEvaluator;
use rgs_core::{
    AccessDenied, ActingIdentity, ArtifactId, AttrMap, CategoryId, ItemRef, ObjectStore,
    ResolutionError,
};

use crate::registry::{ProtectedArtifact, ProtectedArtifactRegistry};

/// Failure modes of an interception check.
#[derive(Error, Debug)]
pub enum ProtectError {
    /// The write was vetoed.
    #[error(transparent)]
    Denied(#[from] AccessDenied),

    /// A store read needed by the check failed.
    #[error(transparent)]
    Resolution(#[from] ResolutionError),
}

/// Synchronous veto gate for attribute and category mutations.
pub struct MutationInterceptor {
    registry: Arc<ProtectedArtifactRegistry>,
    evaluator: CapabilityEvaluator,
    objects: Arc<dyn ObjectStore>,
    enabled: AtomicBool,
}

impl MutationInterceptor {
    /// Build an interceptor. Interception starts enabled.
    pub fn new(
        registry: Arc<ProtectedArtifactRegistry>,
        evaluator: CapabilityEvaluator,
        objects: Arc<dyn ObjectStore>,
    ) -> Self {
        Self {
            registry,
            evaluator,
            objects,
            enabled: AtomicBool::new(true),
        }
    }

    /// Turn interception on.
    pub fn enable(&self) {
        self.enabled.store(true, Ordering::Relaxed);
    }

    /// Turn interception off globally. Intended for maintenance windows
    /// where protection must be bypassed wholesale.
    pub fn disable(&self) {
        self.enabled.store(false, Ordering::Relaxed);
    }

    /// Whether interception is currently on.
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Check a category application before it is made.
    pub fn before_category_add(
        &self,
        item: &ItemRef,
        category: &CategoryId,
        identity: Option<&ActingIdentity>,
    ) -> Result<(), ProtectError> {
        self.check_category(item, category, identity)
    }

    /// Check a category removal before it is made.
    pub fn before_category_remove(
        &self,
        item: &ItemRef,
        category: &CategoryId,
        identity: Option<&ActingIdentity>,
    ) -> Result<(), ProtectError> {
        self.check_category(item, category, identity)
    }

    /// Check an attribute update before it is applied.
    ///
    /// `before` and `after` are snapshots of the item's attribute map.
    /// Every key present in `after` is checked; keys absent from `after`
    /// are not this mutation's concern. A JSON `null` before-value counts
    /// as "no prior value".
    pub fn before_attribute_update(
        &self,
        item: &ItemRef,
        before: &AttrMap,
        after: &AttrMap,
        identity: Option<&ActingIdentity>,
    ) -> Result<(), ProtectError> {
        let Some(identity) = self.gated_identity(identity) else {
            return Ok(());
        };

        for (key, after_value) in after {
            let artifact_id = ArtifactId::Attribute(key.clone());
            let Some(artifact) = self.registry.lookup(&artifact_id) else {
                continue;
            };

            let before_value = before.get(key).filter(|value| !value.is_null());
            let Some(before_value) = before_value else {
                // First-time population of a protected attribute is never
                // gated, whatever the identity's capabilities.
                debug!(item = %item, key = %key, "first write to protected attribute, allowed");
                continue;
            };
            if before_value == after_value {
                continue;
            }

            if !self.can_edit(item, artifact, identity)? {
                debug!(item = %item, key = %key, identity = %identity, "attribute update vetoed");
                return Err(AccessDenied {
                    identity: identity.name.clone(),
                    artifact: artifact_id,
                    item: *item,
                }
                .into());
            }
        }
        Ok(())
    }

    /// Whether the identity may edit the protected artifact on the item:
    /// the item must sit under a governing file plan, and at least one of
    /// the artifact's capabilities must be granted.
    pub fn can_edit(
        &self,
        item: &ItemRef,
        artifact: &ProtectedArtifact,
        identity: &ActingIdentity,
    ) -> Result<bool, ResolutionError> {
        if self.objects.file_plan_for(item)?.is_none() {
            debug!(item = %item, artifact = %artifact.id, "no governing file plan, edit denied");
            return Ok(false);
        }
        self.evaluator
            .any_granted(identity, item, &artifact.capabilities)
    }

    fn check_category(
        &self,
        item: &ItemRef,
        category: &CategoryId,
        identity: Option<&ActingIdentity>,
    ) -> Result<(), ProtectError> {
        let Some(identity) = self.gated_identity(identity) else {
            return Ok(());
        };
        let artifact_id = ArtifactId::Category(category.clone());
        let Some(artifact) = self.registry.lookup(&artifact_id) else {
            return Ok(());
        };
        if self.can_edit(item, artifact, identity)? {
            return Ok(());
        }
        debug!(item = %item, category = %category, identity = %identity, "category mutation vetoed");
        Err(AccessDenied {
            identity: identity.name.clone(),
            artifact: artifact_id,
            item: *item,
        }
        .into())
    }

    /// The identity the gate applies to, or `None` when the call is
    /// exempt: interception disabled, no identity, or trusted identity.
    fn gated_identity<'a>(
        &self,
        identity: Option<&'a ActingIdentity>,
    ) -> Option<&'a ActingIdentity> {
        if !self.is_enabled() {
            return None;
        }
        identity.filter(|id| !id.trusted)
    }
}

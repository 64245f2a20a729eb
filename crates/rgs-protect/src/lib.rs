//! # rgs-protect — Protected Artifacts and Mutation Interception
//!
//! Write-protection for specific attributes and categories. A host
//! registers protected artifacts once during startup; afterwards every
//! attribute or category mutation calls the interceptor synchronously,
//! inside the same unit of work as the mutation itself, and a veto prevents
//! the write from taking effect at all.
//!
//! ## Design
//!
//! Registration is funneled through one idempotent `register` entry point
//! on a registry the host owns and passes by reference; there is no static
//! singleton. The `&mut self` receiver makes the initialization phase a
//! single-writer phase at compile time; once the host wraps the registry in
//! an `Arc`, it is immutable and reads are lock-free.
//!
//! Interception is an explicit function call made by the mutation code
//! path, not a subscription: the host's attribute-update operation calls
//! [`MutationInterceptor::before_attribute_update`] before applying
//! changes, and propagates a veto as its own failure.

mod intercept;
mod registry;

pub use intercept::{MutationInterceptor, ProtectError};
pub use registry::{ProtectedArtifact, ProtectedArtifactRegistry};

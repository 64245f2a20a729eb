//! # Acting Identity
//!
//! The identity on whose behalf a mutation or query runs, with an explicit
//! `trusted` flag.
//!
//! ## Design
//!
//! Trust is plain data on the value passed into every interception call.
//! There is no thread-local or ambient "run as system" state: a caller that
//! wants the system bypass must hold an identity constructed through
//! [`ActingIdentity::system`], and that fact is visible at every call site.

use serde::{Deserialize, Serialize};

/// Reserved name of the trusted system identity.
pub const SYSTEM_IDENTITY: &str = "system";

/// The identity performing an operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActingIdentity {
    /// Identity name as known to the host's permission backend.
    pub name: String,
    /// Whether this is the trusted system identity. Trusted identities
    /// bypass mutation gating entirely.
    pub trusted: bool,
}

impl ActingIdentity {
    /// An ordinary, untrusted identity.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            trusted: false,
        }
    }

    /// The trusted system identity.
    pub fn system() -> Self {
        Self {
            name: SYSTEM_IDENTITY.to_string(),
            trusted: true,
        }
    }
}

impl std::fmt::Display for ActingIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.trusted {
            write!(f, "{} (trusted)", self.name)
        } else {
            f.write_str(&self.name)
        }
    }
}

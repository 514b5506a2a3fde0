//! domacl core: policy data model, error types, and the tier validators.
//!
//! This crate defines the entry shapes and the narrowing rules shared by the
//! store and any evaluator that consumes computed permissions. It carries no
//! storage or runtime dependencies so it can be reused in multiple contexts.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here.
//! All fallible paths must surface as `DomAclError`/`Result` so a malformed
//! entry never takes down the process that evaluates permissions.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod entry;
pub mod error;
pub mod validate;

/// Shared result type.
pub use error::{DomAclError, ErrorCode, Result};

pub use entry::{
    ControlEntry, DomainRoleEntry, EntryKey, MasterAccessControlEntry, MasterRegistrationControlEntry,
    MediatorAccessControlEntry, MediatorRegistrationControlEntry, OwnerAccessControlEntry,
    OwnerRegistrationControlEntry, Permission, Role, TrustLevel, WILDCARD,
};
pub use validate::{AceValidator, RceValidator, TierBounds, TierGrant};

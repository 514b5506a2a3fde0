//! Policy entries: domain roles plus the access and registration control entries.
//!
//! Master and Mediator tiers share one shape (a default value plus the set of
//! values lower tiers may pick from); the Owner tier carries one concrete value.
//! Registration entries govern provider registration and have no operation.

mod access;
mod key;
mod level;
mod registration;
mod role;

pub use access::{MasterAccessControlEntry, MediatorAccessControlEntry, OwnerAccessControlEntry};
pub use key::{ControlEntry, EntryKey};
pub use level::{Permission, TrustLevel};
pub use registration::{
    MasterRegistrationControlEntry, MediatorRegistrationControlEntry, OwnerRegistrationControlEntry,
};
pub use role::{DomainRoleEntry, Role};

/// Reserved uid/operation value matching any caller or operation when no
/// specific entry exists.
pub const WILDCARD: &str = "*";

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::key::ControlEntry;
use super::level::{Permission, TrustLevel};

/// Master tier access control entry: bounds what Mediator and Owner may grant
/// for invoking `operation` on `domain`/`interface_name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MasterAccessControlEntry {
    pub uid: String,
    pub domain: String,
    pub interface_name: String,
    pub operation: String,
    pub default_consumer_permission: Permission,
    pub possible_consumer_permissions: BTreeSet<Permission>,
    pub default_required_trust_level: TrustLevel,
    pub possible_required_trust_levels: BTreeSet<TrustLevel>,
}

/// Mediator entries have the Master shape and live in their own store.
pub type MediatorAccessControlEntry = MasterAccessControlEntry;

/// Owner tier access control entry: one concrete permission and trust level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OwnerAccessControlEntry {
    pub uid: String,
    pub domain: String,
    pub interface_name: String,
    pub operation: String,
    pub consumer_permission: Permission,
    pub required_trust_level: TrustLevel,
}

impl ControlEntry for MasterAccessControlEntry {
    fn uid(&self) -> &str {
        &self.uid
    }
    fn domain(&self) -> &str {
        &self.domain
    }
    fn interface_name(&self) -> &str {
        &self.interface_name
    }
    fn operation(&self) -> Option<&str> {
        Some(&self.operation)
    }
}

impl ControlEntry for OwnerAccessControlEntry {
    fn uid(&self) -> &str {
        &self.uid
    }
    fn domain(&self) -> &str {
        &self.domain
    }
    fn interface_name(&self) -> &str {
        &self.interface_name
    }
    fn operation(&self) -> Option<&str> {
        Some(&self.operation)
    }
}

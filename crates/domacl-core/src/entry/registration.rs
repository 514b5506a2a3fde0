use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::key::ControlEntry;
use super::level::{Permission, TrustLevel};

/// Master tier registration control entry: bounds who may register a provider
/// for `domain`/`interface_name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MasterRegistrationControlEntry {
    pub uid: String,
    pub domain: String,
    pub interface_name: String,
    pub default_provider_permission: Permission,
    pub possible_provider_permissions: BTreeSet<Permission>,
    pub default_required_trust_level: TrustLevel,
    pub possible_required_trust_levels: BTreeSet<TrustLevel>,
}

pub type MediatorRegistrationControlEntry = MasterRegistrationControlEntry;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OwnerRegistrationControlEntry {
    pub uid: String,
    pub domain: String,
    pub interface_name: String,
    pub provider_permission: Permission,
    pub required_trust_level: TrustLevel,
}

impl ControlEntry for MasterRegistrationControlEntry {
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
        None
    }
}

impl ControlEntry for OwnerRegistrationControlEntry {
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
        None
    }
}

//! Entry fixtures shared by the store tests.

#![allow(dead_code)]

use std::collections::BTreeSet;

use domacl_core::entry::{
    DomainRoleEntry, MasterAccessControlEntry, MasterRegistrationControlEntry,
    OwnerAccessControlEntry, OwnerRegistrationControlEntry, Permission, Role, TrustLevel,
};

pub const ALL_PERMISSIONS: [Permission; 3] = [Permission::Yes, Permission::Ask, Permission::No];
pub const ALL_TRUST_LEVELS: [TrustLevel; 3] = [TrustLevel::Low, TrustLevel::Mid, TrustLevel::High];

pub fn perms(p: &[Permission]) -> BTreeSet<Permission> {
    p.iter().copied().collect()
}

pub fn trusts(t: &[TrustLevel]) -> BTreeSet<TrustLevel> {
    t.iter().copied().collect()
}

/// Master/Mediator ACE allowing every permission and trust level.
pub fn master_ace(uid: &str, domain: &str, interface_name: &str, operation: &str) -> MasterAccessControlEntry {
    MasterAccessControlEntry {
        uid: uid.into(),
        domain: domain.into(),
        interface_name: interface_name.into(),
        operation: operation.into(),
        default_consumer_permission: Permission::Yes,
        possible_consumer_permissions: perms(&ALL_PERMISSIONS),
        default_required_trust_level: TrustLevel::Low,
        possible_required_trust_levels: trusts(&ALL_TRUST_LEVELS),
    }
}

pub fn owner_ace(
    uid: &str,
    domain: &str,
    interface_name: &str,
    operation: &str,
    permission: Permission,
) -> OwnerAccessControlEntry {
    OwnerAccessControlEntry {
        uid: uid.into(),
        domain: domain.into(),
        interface_name: interface_name.into(),
        operation: operation.into(),
        consumer_permission: permission,
        required_trust_level: TrustLevel::Low,
    }
}

/// Master/Mediator RCE allowing every permission and trust level.
pub fn master_rce(uid: &str, domain: &str, interface_name: &str) -> MasterRegistrationControlEntry {
    MasterRegistrationControlEntry {
        uid: uid.into(),
        domain: domain.into(),
        interface_name: interface_name.into(),
        default_provider_permission: Permission::Yes,
        possible_provider_permissions: perms(&ALL_PERMISSIONS),
        default_required_trust_level: TrustLevel::Low,
        possible_required_trust_levels: trusts(&ALL_TRUST_LEVELS),
    }
}

pub fn owner_rce(
    uid: &str,
    domain: &str,
    interface_name: &str,
    permission: Permission,
) -> OwnerRegistrationControlEntry {
    OwnerRegistrationControlEntry {
        uid: uid.into(),
        domain: domain.into(),
        interface_name: interface_name.into(),
        provider_permission: permission,
        required_trust_level: TrustLevel::Low,
    }
}

pub fn dre(uid: &str, role: Role, domains: &[&str]) -> DomainRoleEntry {
    DomainRoleEntry::new(uid, role, domains.iter().map(|d| d.to_string()).collect())
}

//! Tier narrowing rules for access and registration entries.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::BTreeSet;

use domacl_core::entry::{
    MasterAccessControlEntry, MasterRegistrationControlEntry, OwnerAccessControlEntry,
    OwnerRegistrationControlEntry, Permission, TrustLevel,
};
use domacl_core::validate::{validate_owner, TierBounds};
use domacl_core::{AceValidator, RceValidator};

fn perms(p: &[Permission]) -> BTreeSet<Permission> {
    p.iter().copied().collect()
}

fn trusts(t: &[TrustLevel]) -> BTreeSet<TrustLevel> {
    t.iter().copied().collect()
}

fn master_ace() -> MasterAccessControlEntry {
    MasterAccessControlEntry {
        uid: "*".into(),
        domain: "d1".into(),
        interface_name: "i1".into(),
        operation: "op1".into(),
        default_consumer_permission: Permission::Yes,
        possible_consumer_permissions: perms(&[Permission::Yes, Permission::No]),
        default_required_trust_level: TrustLevel::Low,
        possible_required_trust_levels: trusts(&[TrustLevel::Low, TrustLevel::Mid, TrustLevel::High]),
    }
}

fn owner_ace(permission: Permission, trust: TrustLevel) -> OwnerAccessControlEntry {
    OwnerAccessControlEntry {
        uid: "*".into(),
        domain: "d1".into(),
        interface_name: "i1".into(),
        operation: "op1".into(),
        consumer_permission: permission,
        required_trust_level: trust,
    }
}

#[test]
fn absent_mediator_is_valid() {
    let master = master_ace();
    assert!(AceValidator::new(Some(&master), None, None).is_mediator_valid());
    assert!(AceValidator::new(None, None, None).is_mediator_valid());
}

#[test]
fn mediator_without_master_is_valid() {
    let mut mediator = master_ace();
    mediator.possible_consumer_permissions = perms(&[Permission::Ask]);
    mediator.default_consumer_permission = Permission::Ask;
    assert!(AceValidator::new(None, Some(&mediator), None).is_mediator_valid());
}

#[test]
fn mediator_narrowing_master_is_valid() {
    let master = master_ace();
    let mut mediator = master_ace();
    mediator.possible_consumer_permissions = perms(&[Permission::Yes]);
    mediator.possible_required_trust_levels = trusts(&[TrustLevel::Low]);
    assert!(AceValidator::new(Some(&master), Some(&mediator), None).is_mediator_valid());
}

#[test]
fn mediator_equal_to_master_is_valid() {
    let master = master_ace();
    let mediator = master_ace();
    assert!(AceValidator::new(Some(&master), Some(&mediator), None).is_mediator_valid());
}

#[test]
fn mediator_widening_permissions_is_rejected() {
    let master = master_ace();
    let mut mediator = master_ace();
    mediator.possible_consumer_permissions = perms(&[Permission::Yes, Permission::Ask]);
    let v = AceValidator::new(Some(&master), Some(&mediator), None);
    assert!(!v.is_mediator_valid());
    assert!(v.mediator_violation().unwrap().contains("subset"));
}

#[test]
fn mediator_default_outside_master_is_rejected() {
    let master = master_ace();
    let mut mediator = master_ace();
    mediator.default_consumer_permission = Permission::Ask;
    assert!(!AceValidator::new(Some(&master), Some(&mediator), None).is_mediator_valid());

    let mut mediator = master_ace();
    mediator.default_required_trust_level = TrustLevel::High;
    mediator.possible_required_trust_levels = trusts(&[TrustLevel::High]);
    assert!(AceValidator::new(Some(&master), Some(&mediator), None).is_mediator_valid());

    let mut narrow_master = master_ace();
    narrow_master.possible_required_trust_levels = trusts(&[TrustLevel::Low]);
    assert!(!AceValidator::new(Some(&narrow_master), Some(&mediator), None).is_mediator_valid());
}

#[test]
fn owner_checked_against_mediator_when_present() {
    let master = master_ace();
    let mut mediator = master_ace();
    mediator.possible_consumer_permissions = perms(&[Permission::Yes]);

    let no = owner_ace(Permission::No, TrustLevel::Low);
    assert!(!AceValidator::new(Some(&master), Some(&mediator), Some(&no)).is_owner_valid());
    // the master alone would have allowed it
    assert!(AceValidator::new(Some(&master), None, Some(&no)).is_owner_valid());

    let yes = owner_ace(Permission::Yes, TrustLevel::High);
    assert!(AceValidator::new(Some(&master), Some(&mediator), Some(&yes)).is_owner_valid());
}

#[test]
fn owner_rejected_when_mediator_escapes_master() {
    let mut master = master_ace();
    master.possible_consumer_permissions = perms(&[Permission::No]);
    master.default_consumer_permission = Permission::No;
    let mediator = master_ace();
    let owner = owner_ace(Permission::Yes, TrustLevel::Low);
    assert!(!AceValidator::new(Some(&master), Some(&mediator), Some(&owner)).is_owner_valid());
}

#[test]
fn owner_trust_level_must_be_possible() {
    let mut master = master_ace();
    master.possible_required_trust_levels = trusts(&[TrustLevel::Low]);
    let owner = owner_ace(Permission::Yes, TrustLevel::High);
    assert!(!AceValidator::new(Some(&master), None, Some(&owner)).is_owner_valid());
    assert!(!validate_owner(&master, Some(&owner)));
}

#[test]
fn owner_without_bounds_or_absent_is_valid() {
    let owner = owner_ace(Permission::Ask, TrustLevel::High);
    assert!(AceValidator::new(None, None, Some(&owner)).is_owner_valid());
    assert!(validate_owner::<_, OwnerAccessControlEntry>(&master_ace(), None));
}

#[test]
fn self_consistency() {
    let mut master = master_ace();
    assert!(master.is_self_consistent());
    master.default_consumer_permission = Permission::Ask;
    assert!(!master.is_self_consistent());
}

fn master_rce() -> MasterRegistrationControlEntry {
    MasterRegistrationControlEntry {
        uid: "*".into(),
        domain: "d1".into(),
        interface_name: "i1".into(),
        default_provider_permission: Permission::Yes,
        possible_provider_permissions: perms(&[Permission::Yes, Permission::Ask]),
        default_required_trust_level: TrustLevel::Mid,
        possible_required_trust_levels: trusts(&[TrustLevel::Mid, TrustLevel::High]),
    }
}

#[test]
fn rce_rules_mirror_ace_rules() {
    let master = master_rce();
    let mut mediator = master_rce();
    mediator.possible_provider_permissions = perms(&[Permission::Yes]);
    assert!(RceValidator::new(Some(&master), Some(&mediator), None).is_mediator_valid());

    mediator.possible_required_trust_levels = trusts(&[TrustLevel::Low]);
    assert!(!RceValidator::new(Some(&master), Some(&mediator), None).is_mediator_valid());

    let owner = OwnerRegistrationControlEntry {
        uid: "alice".into(),
        domain: "d1".into(),
        interface_name: "i1".into(),
        provider_permission: Permission::Ask,
        required_trust_level: TrustLevel::High,
    };
    assert!(RceValidator::new(Some(&master), None, Some(&owner)).is_owner_valid());

    let mut narrow = master_rce();
    narrow.possible_provider_permissions = perms(&[Permission::Yes]);
    assert!(!RceValidator::new(Some(&master), Some(&narrow), Some(&owner)).is_owner_valid());
}
